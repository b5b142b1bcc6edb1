use std::env;

#[derive(Clone)]
pub struct Config {
    pub addr: String,
    pub api_url: String,
    pub chat_url: String,
    pub chat_room: String,
    pub maps: Option<MapEmbed>,
}

/// Map embed provider. Configured up front or not at all; nothing is loaded
/// on the fly from a hardcoded script URL.
#[derive(Clone)]
pub struct MapEmbed {
    pub base_url: String,
    pub key: String,
}

impl MapEmbed {
    pub fn embed_url(&self, address: &str) -> String {
        format!("{}?key={}&q={}", self.base_url, self.key, urlencode(address))
    }
}

impl Config {
    pub fn from_env() -> Config {
        let maps = match (var("PAPAJOBS_MAPS_URL"), var("PAPAJOBS_MAPS_KEY")) {
            (Some(base_url), Some(key)) => Some(MapEmbed { base_url, key }),
            _ => {
                log::info!("map provider not configured, address maps disabled");
                None
            }
        };

        Config {
            addr: var_or("PAPAJOBS_ADDR", "0.0.0.0:8080"),
            api_url: var_or("PAPAJOBS_API_URL", "http://localhost:4000/graphql"),
            chat_url: var_or("PAPAJOBS_CHAT_URL", "ws://localhost:3000/ws"),
            chat_room: var_or("PAPAJOBS_CHAT_ROOM", "papajobs"),
            maps,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        log::warn!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_escapes_the_address() {
        let maps = MapEmbed {
            base_url: "https://maps.example.com/embed".to_string(),
            key: "k1".to_string(),
        };
        assert_eq!(
            maps.embed_url("Calle Mayor 5, Madrid"),
            "https://maps.example.com/embed?key=k1&q=Calle+Mayor+5%2C+Madrid"
        );
    }
}
