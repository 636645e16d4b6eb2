//! # Text Extraction
//!
//! Small, explicitly-contracted extraction functions over the text the
//! external collaborators hand back (`ippfind` URIs, `ping` output, a
//! printer's embedded status page). Each function owns one source format
//! and is exercised against literal samples below.

use std::net::Ipv4Addr;

/// Extracts the hostname from a discovery URI line such as
/// `ipp://printer1.local:631/ipp/print`: the substring between `//` and
/// the following `:`. Returns `None` when either delimiter is absent or
/// the hostname would be empty.
pub fn hostname_from_uri(line: &str) -> Option<&str> {
    let rest = line.split_once("//")?.1;
    let (host, _) = rest.split_once(':')?;
    if host.is_empty() { None } else { Some(host) }
}

/// Finds the resolved address in `ping` output: the first parenthesized
/// token that parses as an IPv4 address, e.g. the `(10.0.0.5)` in
/// `PING printer1.local (10.0.0.5): 56 data bytes`.
pub fn ip_from_ping(output: &str) -> Option<Ipv4Addr> {
    let mut rest = output;
    while let Some(open) = rest.find('(') {
        let tail = &rest[open + 1..];
        let close = tail.find(')')?;
        if let Ok(ip) = tail[..close].parse() {
            return Some(ip);
        }
        rest = &tail[close + 1..];
    }
    None
}

/// Pulls a human-readable label out of an HP-style embedded status page.
///
/// Steps, in order, on the first line containing `userId`:
/// 1. strip markup tags, leaving the element body;
/// 2. rewrite each `&nbsp;` entity to `_`;
/// 3. truncate at the first `___` run (trailing layout filler);
/// 4. turn the first `_` back into a space so a leading indent entity
///    trims away, trim, and replace remaining spaces with underscores.
///
/// Returns `None` when no `userId` line exists or the result is empty;
/// the caller then leaves the desired name blank and the compiler falls
/// back to the hostname label.
pub fn label_from_status_page(html: &str) -> Option<String> {
    let line = html.lines().find(|l| l.contains("userId"))?;

    let mut text = strip_tags(line).replace("&nbsp;", "_");
    if let Some(marker) = text.find("___") {
        text.truncate(marker);
    }
    let label = text.replacen('_', " ", 1).trim().replace(' ', "_");
    if label.is_empty() { None } else { Some(label) }
}

/// Removes complete `<...>` spans; an unterminated `<` fragment is kept.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
