use serde::{Deserialize, Serialize};

// named events on the upstream socket; message payloads carry
// { room, message, user }

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outgoing {
    Join { room: String, user: String },
    Message { room: String, message: String, user: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Incoming {
    /// The server acknowledged our last send.
    Ack,
    Message { room: String, message: String, user: String },
    Disconnect,
}

/// What the widget renders: one line per message.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetLine<'a> {
    pub user: &'a str,
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outgoing_message_shape() {
        let event = Outgoing::Message {
            room: "papajobs".to_string(),
            message: "hola".to_string(),
            user: "ana".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "message",
                "data": { "room": "papajobs", "message": "hola", "user": "ana" }
            })
        );
    }

    #[test]
    fn incoming_events_parse() {
        let ack: Incoming = serde_json::from_value(json!({ "event": "ack" })).unwrap();
        assert_eq!(ack, Incoming::Ack);

        let msg: Incoming = serde_json::from_value(json!({
            "event": "message",
            "data": { "room": "papajobs", "message": "hola", "user": "ana" }
        }))
        .unwrap();
        assert_eq!(
            msg,
            Incoming::Message {
                room: "papajobs".to_string(),
                message: "hola".to_string(),
                user: "ana".to_string(),
            }
        );
    }

    #[test]
    fn unknown_events_do_not_parse() {
        assert!(serde_json::from_value::<Incoming>(json!({ "event": "typing" })).is_err());
    }
}
