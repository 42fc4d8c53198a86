use crate::UrlError;
use url::Url;

/// Turns a product link `href` into an absolute HTTP(S) URL
///
/// # Resolution Rules
///
/// 1. Surrounding whitespace is trimmed; an empty href is rejected
/// 2. Scheme-relative (`//host/path`) → `https://host/path`
/// 3. Already absolute → kept, but only HTTP and HTTPS are accepted
/// 4. Root-relative (`/products/x`) or path-relative (`products/x`) →
///    resolved against the site origin
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::absolutize_link;
/// use url::Url;
///
/// let origin = Url::parse("https://shop.example.com/").unwrap();
/// let url = absolutize_link("/products/ring", &origin).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/products/ring");
/// ```
pub fn absolutize_link(href: &str, origin: &Url) -> Result<Url, UrlError> {
    let url = resolve(href, origin)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS links are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Turns an image `src` into an absolute URL
///
/// Same rules as [`absolutize_link`], except that any absolute scheme is
/// kept as-is (inline `data:` images are absolute already).
pub fn absolutize_image(src: &str, origin: &Url) -> Result<Url, UrlError> {
    resolve(src, origin)
}

fn resolve(raw: &str, origin: &Url) -> Result<Url, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    if raw.starts_with("//") {
        return Url::parse(&format!("https:{}", raw)).map_err(|e| UrlError::Parse(e.to_string()));
    }

    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => origin
            .join(raw)
            .map_err(|e| UrlError::Parse(e.to_string())),
        Err(e) => Err(UrlError::Parse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://shop.example.com/").unwrap()
    }

    #[test]
    fn test_root_relative_link() {
        let url = absolutize_link("/products/moon-ring", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/products/moon-ring");
    }

    #[test]
    fn test_path_relative_link() {
        let url = absolutize_link("products/moon-ring", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/products/moon-ring");
    }

    #[test]
    fn test_absolute_link_kept() {
        let url = absolutize_link("https://other.example.com/p/1?variant=2", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/p/1?variant=2");
    }

    #[test]
    fn test_scheme_relative_link_gets_https() {
        let origin = Url::parse("http://127.0.0.1:9000/").unwrap();
        let url = absolutize_link("//cdn.example.com/p/1", &origin).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/p/1");
    }

    #[test]
    fn test_link_whitespace_trimmed() {
        let url = absolutize_link("  /products/a \n", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/products/a");
    }

    #[test]
    fn test_empty_link_rejected() {
        assert!(matches!(
            absolutize_link("   ", &origin()),
            Err(UrlError::Empty)
        ));
    }

    #[test]
    fn test_javascript_link_rejected() {
        assert!(matches!(
            absolutize_link("javascript:void(0)", &origin()),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_protocol_relative_image() {
        let url = absolutize_image("//cdn.shop.example.com/img/a.jpg?v=3", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://cdn.shop.example.com/img/a.jpg?v=3");
    }

    #[test]
    fn test_relative_image_resolved() {
        let url = absolutize_image("/files/a.png", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/files/a.png");
    }

    #[test]
    fn test_data_image_kept() {
        let url = absolutize_image("data:image/gif;base64,R0lGOD", &origin()).unwrap();
        assert_eq!(url.scheme(), "data");
    }
}
