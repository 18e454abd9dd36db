/// Scheme-and-host boundary used by `normalize`. Treated as a plain byte
/// count, never a parsed scheme: that is what makes the same cut work for
/// `http://` and scp-style `git@host:` remotes.
const SCHEME_BOUNDARY: usize = "https://".len();

/// Derive the storage key for a remote URL.
///
/// Everything up to and including the first `/` found past the
/// scheme-and-host boundary is kept; the repository-specific path after it
/// is dropped, so every repository under one host (or one `git@host:org/`
/// prefix) shares a single stored credential. URLs no longer than the
/// boundary, URLs with no such slash, and inputs where the boundary falls
/// inside a multi-byte character pass through verbatim. A degenerate key
/// just misses the store and lands in the create path.
pub fn normalize(url: &str) -> String {
    if url.len() <= SCHEME_BOUNDARY {
        return url.to_string();
    }
    let Some(tail) = url.get(SCHEME_BOUNDARY..) else {
        return url.to_string();
    };
    match tail.find('/') {
        Some(separator) => url[..SCHEME_BOUNDARY + separator + 1].to_string(),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests;
