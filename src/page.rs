use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::error::BuildError;
use crate::markdown_to_html;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# +(.+)$").expect("title pattern"));

/// Extract the page title from the first level-1 heading of the raw source.
pub fn extract_title(markdown: &str) -> Result<String, BuildError> {
    TITLE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(BuildError::MissingTitle)
}

/// Render one markdown page through the HTML template.
///
/// Substitutes `{{ Title }}` and `{{ Content }}`, then rewrites absolute
/// `href="/` and `src="/` prefixes to `basepath` so the site can be hosted
/// under a sub-path.
pub fn generate_page(markdown: &str, template: &str, basepath: &str) -> Result<String, BuildError> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html(markdown)?;
    Ok(template
        .replace("{{ Title }}", &title)
        .replace("{{ Content }}", &content)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}")))
}

/// Mirror `src` into `dest`, replacing `dest` if it already exists.
pub fn copy_recursive(src: &Path, dest: &Path) -> Result<(), BuildError> {
    if dest.is_dir() {
        fs::remove_dir_all(dest)?;
    }
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_recursive(&entry.path(), &target)?;
        } else {
            info!("copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Walk `content`, rendering every `.md` file into a matching `.html` file
/// under `dest`, preserving the directory structure.
pub fn generate_pages(
    content: &Path,
    template: &str,
    dest: &Path,
    basepath: &str,
) -> Result<(), BuildError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(content)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            generate_pages(&path, template, &dest.join(entry.file_name()), basepath)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let markdown = fs::read_to_string(&path)?;
            let page = generate_page(&markdown, template, basepath)?;
            let out = dest.join(entry.file_name()).with_extension("html");
            info!("generating {}", out.display());
            fs::write(out, page)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{extract_title, generate_page};
    use crate::error::BuildError;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_from_first_h1() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
        assert_eq!(
            extract_title("intro text\n\n# Actual Title\n\n## not this").unwrap(),
            "Actual Title"
        );
    }

    #[test]
    fn missing_title_errors() {
        assert!(matches!(
            extract_title("## only a subtitle"),
            Err(BuildError::MissingTitle)
        ));
    }

    #[test]
    fn template_substitution_and_basepath_rewrite() {
        let template = "<html><title>{{ Title }}</title><body>{{ Content }}</body></html>";
        let md = "# Home\n\nSee [about](/about) and ![logo](/img/logo.png)";
        let page = generate_page(md, template, "/site/").unwrap();
        assert_eq!(
            page,
            concat!(
                "<html><title>Home</title><body>",
                "<div><h1>Home</h1>",
                "<p>See <a href=\"/site/about\">about</a> and ",
                "<img src=\"/site/img/logo.png\" alt=\"logo\"></img></p>",
                "</div></body></html>"
            )
        );
    }

    #[test]
    fn root_basepath_leaves_links_unchanged() {
        let template = "{{ Content }}";
        let md = "# T\n\n[x](/y)";
        let page = generate_page(md, template, "/").unwrap();
        assert!(page.contains("href=\"/y\""));
    }
}
