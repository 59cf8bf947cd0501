//! Command encoder
//!
//! Turns a typed method call into the script statement that invokes it on
//! the remote player object, `player.<method>(<args>);`. Numbers and bools
//! encode as bare literals; strings embed as single-quoted literals with no
//! escaping (callers are trusted not to pass values containing a quote —
//! a documented limitation of the embed protocol shim, not corrected here);
//! id lists join with `,` into one quoted literal.

use std::fmt::Write;

/// One already-validated command argument.
#[derive(Debug, Clone)]
pub(crate) enum Arg<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    /// Joined with `,` and emitted as a single quoted literal.
    StrList(&'a [String]),
}

/// Encode a call on the remote player object.
pub(crate) fn call(method: &str, args: &[Arg<'_>]) -> String {
    let mut stmt = format!("player.{}(", method);
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            stmt.push_str(", ");
        }
        match arg {
            Arg::Int(v) => {
                let _ = write!(stmt, "{}", v);
            }
            Arg::Float(v) => {
                let _ = write!(stmt, "{}", v);
            }
            Arg::Bool(v) => {
                let _ = write!(stmt, "{}", v);
            }
            Arg::Str(v) => {
                let _ = write!(stmt, "'{}'", v);
            }
            Arg::StrList(list) => {
                let _ = write!(stmt, "'{}'", list.join(","));
            }
        }
    }
    stmt.push_str(");");
    stmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arg_call() {
        assert_eq!(call("playVideo", &[]), "player.playVideo();");
    }

    #[test]
    fn test_literal_encoding() {
        assert_eq!(
            call("seekTo", &[Arg::Float(42.5), Arg::Bool(true)]),
            "player.seekTo(42.5, true);"
        );
        assert_eq!(call("playVideoAt", &[Arg::Int(2)]), "player.playVideoAt(2);");
        assert_eq!(
            call("setPlaybackQuality", &[Arg::Str("hd720")]),
            "player.setPlaybackQuality('hd720');"
        );
    }

    #[test]
    fn test_whole_floats_keep_js_number_form() {
        // f64 Display drops the fraction; still a valid script number.
        assert_eq!(
            call("setPlaybackRate", &[Arg::Float(2.0)]),
            "player.setPlaybackRate(2);"
        );
    }

    #[test]
    fn test_id_list_joins_into_one_quoted_literal() {
        let ids = vec!["a1".to_string(), "b2".to_string(), "c3".to_string()];
        assert_eq!(
            call("cuePlaylist", &[Arg::StrList(&ids)]),
            "player.cuePlaylist('a1,b2,c3');"
        );
    }
}
