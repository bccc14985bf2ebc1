/// Best-effort YouTube video id from a watch URL, short link or bare id.
///
/// - `…watch?v=ID&t=10` gives `ID`
/// - `https://youtu.be/ID?si=x` gives `ID`
/// - anything else gives its first 11 characters
pub fn extract_video_id(url: &str) -> &str {
    if let Some((_, rest)) = url.split_once("v=") {
        let rest = rest.split("v=").next().unwrap_or(rest);
        return rest.split('&').next().unwrap_or(rest);
    }
    if let Some((_, rest)) = url.rsplit_once("youtu.be/") {
        return rest.split('?').next().unwrap_or(rest);
    }
    match url.char_indices().nth(11) {
        Some((idx, _)) => &url[..idx],
        None => url,
    }
}
