//! Image URL resolution

/// Resolves the URL embedded in an image element.
///
/// Whatever string comes back is embedded as-is; the renderer performs no
/// validation of its own.
pub trait ImageResolver {
    fn image_url(&self, url: Option<&str>) -> String;
}

/// Prefixes relative URLs with a configured base URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLoader {
    pub base_url: Option<String>,
}

impl ImageLoader {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }
}

impl ImageResolver for ImageLoader {
    fn image_url(&self, url: Option<&str>) -> String {
        let Some(url) = url else {
            return String::new();
        };
        match &self.base_url {
            Some(base) if !is_absolute(url) => format!("{base}{url}"),
            _ => url.to_string(),
        }
    }
}

/// `scheme:...`, `//host/...` or `/path`.
fn is_absolute(url: &str) -> bool {
    if url.starts_with('/') {
        return true;
    }
    match url.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

impl<F> ImageResolver for F
where
    F: Fn(Option<&str>) -> String,
{
    fn image_url(&self, url: Option<&str>) -> String {
        self(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_empty() {
        assert_eq!(ImageLoader::default().image_url(None), "");
    }

    #[test]
    fn no_base_passes_through() {
        assert_eq!(ImageLoader::default().image_url(Some("a.png")), "a.png");
    }

    #[test]
    fn relative_urls_get_base() {
        let loader = ImageLoader::new(Some("http://cdn.test/img/".into()));
        assert_eq!(loader.image_url(Some("a.png")), "http://cdn.test/img/a.png");
    }

    #[test]
    fn absolute_urls_are_kept() {
        let loader = ImageLoader::new(Some("http://cdn.test/".into()));
        assert_eq!(loader.image_url(Some("https://x.test/a.png")), "https://x.test/a.png");
        assert_eq!(loader.image_url(Some("//x.test/a.png")), "//x.test/a.png");
        assert_eq!(loader.image_url(Some("/a.png")), "/a.png");
        assert_eq!(
            loader.image_url(Some("data:image/png;base64,AAAA")),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn functions_are_resolvers() {
        fn resolve(url: Option<&str>) -> String {
            format!("resolved:{}", url.unwrap_or("?"))
        }
        assert_eq!(resolve.image_url(Some("x")), "resolved:x");
    }
}
