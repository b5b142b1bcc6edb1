use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fixed session length for every booking.
pub const SESSION_MINUTES: u32 = 45;

/// A booking start time as the availability query returns it: `HH:MM` or
/// `HH:MM:SS`, two digits per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("malformed time {0:?}")]
    Malformed(String),
    #[error("time {0:?} out of range")]
    OutOfRange(String),
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Slot, SlotError> {
        let malformed = || SlotError::Malformed(s.to_string());

        let mut parts = s.split(':');
        let hour = field(parts.next(), s)?;
        let minute = field(parts.next(), s)?;
        let second = match parts.next() {
            Some(sec) => field(Some(sec), s)?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(malformed());
        }

        // the hour is not range-checked, see end_of
        if minute > 59 || second > 59 {
            return Err(SlotError::OutOfRange(s.to_string()));
        }

        Ok(Slot { hour, minute, second })
    }
}

fn field(part: Option<&str>, whole: &str) -> Result<u32, SlotError> {
    let part = part.ok_or_else(|| SlotError::Malformed(whole.to_string()))?;
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SlotError::Malformed(whole.to_string()));
    }
    part.parse()
        .map_err(|_| SlotError::Malformed(whole.to_string()))
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Session end time: start plus [`SESSION_MINUTES`], minute overflow carried
/// into the hour, seconds carried through unchanged.
///
/// An end hour of 24 or more is NOT wrapped into the next day
/// (`23:50:00` → `24:35:00`); cross-midnight bookings are not modeled.
pub fn end_of(start: Slot) -> Slot {
    let raw = start.minute + SESSION_MINUTES;
    Slot {
        hour: start.hour + raw / 60,
        minute: raw % 60,
        second: start.second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> Slot {
        s.parse().unwrap()
    }

    #[test]
    fn end_time_carries_the_hour() {
        assert_eq!(end_of(slot("09:40:00")).to_string(), "10:25:00");
        assert_eq!(end_of(slot("09:00:00")).to_string(), "09:45:00");
        assert_eq!(end_of(slot("10:15:00")).to_string(), "11:00:00");
    }

    #[test]
    fn seconds_carry_through_unchanged() {
        assert_eq!(end_of(slot("09:40:30")).to_string(), "10:25:30");
    }

    #[test]
    fn no_day_wrap_past_midnight() {
        assert_eq!(end_of(slot("23:50:00")).to_string(), "24:35:00");
    }

    #[test]
    fn short_form_defaults_seconds() {
        assert_eq!(slot("09:00"), slot("09:00:00"));
        assert_eq!(end_of(slot("09:00")).to_string(), "09:45:00");
    }

    #[test]
    fn malformed_slots_are_rejected() {
        assert_eq!("9:00".parse::<Slot>(), Err(SlotError::Malformed("9:00".into())));
        assert_eq!("".parse::<Slot>(), Err(SlotError::Malformed("".into())));
        assert_eq!("09".parse::<Slot>(), Err(SlotError::Malformed("09".into())));
        assert_eq!(
            "09:00:00:00".parse::<Slot>(),
            Err(SlotError::Malformed("09:00:00:00".into()))
        );
        assert_eq!(
            "ab:cd".parse::<Slot>(),
            Err(SlotError::Malformed("ab:cd".into()))
        );
    }

    #[test]
    fn out_of_range_minutes_are_rejected() {
        assert_eq!(
            "09:61:00".parse::<Slot>(),
            Err(SlotError::OutOfRange("09:61:00".into()))
        );
        assert_eq!(
            "09:00:61".parse::<Slot>(),
            Err(SlotError::OutOfRange("09:00:61".into()))
        );
    }
}
