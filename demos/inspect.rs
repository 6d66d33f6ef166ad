fn main() {
    let args: Vec<String> = std::env::args().collect();
    let md = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "# Overview\n\nSome **bold** text with a [link](/overview)".to_string()
    };

    match mdsite::markdown_to_html(&md) {
        Ok(html) => println!("{html}"),
        Err(e) => eprintln!("parse error: {e}"),
    }
}
