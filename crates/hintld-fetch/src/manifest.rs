//! Link discovery on the download page
//!
//! Parses the page HTML for `href` targets with a wanted suffix.

use anyhow::{Context, Result};
use reqwest::Url;

use crate::runtime::{FetchError, SHARED_RUNTIME, http_client};

/// A downloadable file found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub filename: String,
    pub url: String,
}

/// Fetch the page once and return its links ending with one of `suffixes`.
pub fn fetch_links(page_url: &str, suffixes: &[String]) -> Result<Vec<Link>> {
    let html = SHARED_RUNTIME.handle().block_on(async {
        let response = http_client()
            .get(page_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::from_reqwest(page_url, &e))?;
        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(page_url, &e))
    })
    .with_context(|| format!("Failed to fetch {page_url}"))?;

    let links = parse_html_listing(&html, page_url, suffixes)?;
    log::debug!("{page_url}: {} links", links.len());
    Ok(links)
}

/// Extract `href` targets ending with one of `suffixes`, resolved against
/// `page_url`. Sorted by file name, duplicates removed.
pub fn parse_html_listing(html: &str, page_url: &str, suffixes: &[String]) -> Result<Vec<Link>> {
    let base = Url::parse(page_url).with_context(|| format!("Invalid page URL {page_url}"))?;
    let mut links = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("href=") {
        rest = &rest[start + 5..];
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        rest = &rest[1..];
        let Some(end) = rest.find(quote) else {
            break;
        };
        let href = rest[..end].trim();
        rest = &rest[end + 1..];

        let url = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("{page_url}: skipping href {href:?}: {e}");
                continue;
            }
        };
        // Query and fragment are not part of the file name
        if !suffixes.iter().any(|s| url.path().ends_with(s.as_str())) {
            continue;
        }
        let Some(filename) = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
        else {
            continue;
        };
        links.push(Link {
            filename: filename.to_string(),
            url: url.to_string(),
        });
    }

    links.sort_by(|a, b| a.filename.cmp(&b.filename).then(a.url.cmp(&b.url)));
    links.dedup_by(|a, b| a.filename == b.filename);
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "http://hint.yulab.org/download/";

    fn txt() -> Vec<String> {
        vec![".txt".to_string()]
    }

    #[test]
    fn parse_listing() {
        let html = r#"
<tr><td><a href="HomoSapiens_binary_all.txt">binary all</a></td></tr>
<tr><td><a href="HomoSapiens_binary_hq.txt">binary hq</a></td></tr>
<tr><td><a href="readme.html">readme</a></td></tr>
"#;
        let links = parse_html_listing(html, PAGE, &txt()).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].filename, "HomoSapiens_binary_all.txt");
        assert_eq!(
            links[0].url,
            "http://hint.yulab.org/download/HomoSapiens_binary_all.txt"
        );
    }

    #[test]
    fn absolute_and_root_relative_hrefs() {
        let html = r#"
<a href="https://cdn.example.org/data/a_cocomp_all.txt">a</a>
<a href='/files/b_binary_all.txt'>b</a>
<a href="//mirror.example.org/c_binary_hq.txt">c</a>
"#;
        let links = parse_html_listing(html, "http://hint.yulab.org/download/index.html", &txt()).unwrap();
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://cdn.example.org/data/a_cocomp_all.txt",
                "http://hint.yulab.org/files/b_binary_all.txt",
                "http://mirror.example.org/c_binary_hq.txt",
            ]
        );
    }

    #[test]
    fn relative_to_page_without_trailing_slash() {
        let html = r#"<a href="./data/x.txt">x</a>"#;
        let links = parse_html_listing(html, "http://host/download/page.php?v=2", &txt()).unwrap();
        assert_eq!(links[0].url, "http://host/download/data/x.txt");
        assert_eq!(links[0].filename, "x.txt");

        let links = parse_html_listing(html, "http://host", &txt()).unwrap();
        assert_eq!(links[0].url, "http://host/data/x.txt");
    }

    #[test]
    fn query_string_ignored_for_suffix() {
        let html = r#"<a href="get.php?file=y.txt">y</a><a href="z.txt?dl=1">z</a>"#;
        let links = parse_html_listing(html, PAGE, &txt()).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].filename, "z.txt");
        assert_eq!(links[0].url, "http://hint.yulab.org/download/z.txt?dl=1");
    }

    #[test]
    fn multiple_suffixes() {
        let html = r#"<a href="a.txt">a</a><a href="b.tsv">b</a><a href="c.gz">c</a>"#;
        let suffixes = vec![".txt".to_string(), ".tsv".to_string()];
        let names: Vec<String> = parse_html_listing(html, PAGE, &suffixes)
            .unwrap()
            .into_iter()
            .map(|l| l.filename)
            .collect();
        assert_eq!(names, ["a.txt", "b.tsv"]);
    }

    #[test]
    fn sorted_and_deduplicated() {
        let html = r#"
<a href="c.txt">c</a>
<a href="a.txt">a</a>
<a href="b.txt">b</a>
<a href="a.txt">a again</a>
"#;
        let names: Vec<String> = parse_html_listing(html, PAGE, &txt())
            .unwrap()
            .into_iter()
            .map(|l| l.filename)
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn unquoted_and_unterminated_hrefs() {
        assert!(parse_html_listing("<a href=a.txt>a</a>", PAGE, &txt()).unwrap().is_empty());
        assert!(parse_html_listing(r#"<a href="a.txt"#, PAGE, &txt()).unwrap().is_empty());
    }

    #[test]
    fn parent_directory_href() {
        let html = r#"<a href="../data/x.txt">x</a>"#;
        let links = parse_html_listing(html, "http://host/download/", &txt()).unwrap();
        assert_eq!(links[0].url, "http://host/data/x.txt");
        assert_eq!(links[0].filename, "x.txt");

        let links = parse_html_listing(html, "http://host/a/b/index.html", &txt()).unwrap();
        assert_eq!(links[0].url, "http://host/a/data/x.txt");
    }

    #[test]
    fn uppercase_scheme_is_absolute() {
        let html = r#"<a href="HTTPS://cdn.org/z.txt">z</a>"#;
        let links = parse_html_listing(html, PAGE, &txt()).unwrap();
        assert_eq!(links[0].url, "https://cdn.org/z.txt");
        assert_eq!(links[0].filename, "z.txt");
    }

    #[test]
    fn invalid_page_url() {
        let err = parse_html_listing("", "not a url", &txt()).unwrap_err();
        assert!(format!("{err:#}").contains("not a url"));
    }
}
