use axum::response::{Html, IntoResponse, Response};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

pub fn markdown(src: &str) -> String {
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, pulldown_cmark::Parser::new(src));
    html
}

// rate renders clamped to [0,5]
pub fn stars(rate: f64) -> String {
    let filled = (rate.round().clamp(0.0, 5.0)) as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

// inline result screen for a mutation outcome, with a way back
pub fn notice(title: &str, message: &str, back: &str) -> Response {
    Html(
        include_res!(str, "/pages/notice.html")
            .replace("{title}", &escape(title))
            .replace("{message}", &escape(message))
            .replace("{back}", back),
    )
    .into_response()
}

pub fn escape(src: &str) -> String {
    src.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_clamp_out_of_range() {
        assert_eq!(stars(3.0), "★★★☆☆");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
        assert_eq!(stars(6.0), "★★★★★");
        assert_eq!(stars(4.6), "★★★★★");
    }

    #[test]
    fn escape_kills_markup() {
        assert_eq!(escape("<b>&\"hi\""), "&lt;b&gt;&amp;&quot;hi&quot;");
    }
}
