//! Field checks run before anything is submitted to the backend.

/// Collects per-field messages and writes them into a page template, which
/// carries one `{<field>_error}` placeholder per field.
#[derive(Debug, Default)]
pub struct Errors(Vec<(&'static str, String)>);

impl Errors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn apply(&self, mut page: String, fields: &[&str]) -> String {
        for field in fields {
            let placeholder = format!("{{{field}_error}}");
            page = page.replace(&placeholder, self.get(field).unwrap_or(""));
        }
        page
    }
}

// same shape the backend expects: ^[^\s@]+@[^\s@]+\.[^\s@]+$
pub fn email(value: &str) -> Result<(), String> {
    let invalid = || Err("invalid email address".to_string());

    if value.contains(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') {
        return invalid();
    }
    // the domain needs an interior dot
    let chars: Vec<char> = domain.chars().collect();
    if chars.len() < 3 || !chars[1..chars.len() - 1].contains(&'.') {
        return invalid();
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), String> {
    if (8..=16).contains(&value.chars().count()) {
        Ok(())
    } else {
        Err("password must be 8 to 16 characters".to_string())
    }
}

/// Exactly nine digits, as entered.
pub fn phone(value: &str) -> Result<i64, String> {
    if value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()) {
        value
            .parse()
            .map_err(|_| "invalid phone number".to_string())
    } else {
        Err("phone number must be 9 digits".to_string())
    }
}

pub fn name(label: &str, value: &str) -> Result<(), String> {
    let len = value.trim().chars().count();
    if (2..=64).contains(&len) {
        Ok(())
    } else {
        Err(format!("{label} must be 2 to 64 characters"))
    }
}

pub fn non_blank(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{label} cannot be empty"))
    } else {
        Ok(())
    }
}

/// Review rate stays inside [0,5]; -1 and 6 never reach the network.
pub fn rate(value: i64) -> Result<(), String> {
    if (0..=5).contains(&value) {
        Ok(())
    } else {
        Err("rate must be between 0 and 5".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(email("user@example.com").is_ok());
        assert!(email("a@b.c").is_ok());
        assert!(email("userexample.com").is_err());
        assert!(email("user@examplecom").is_err());
        assert!(email("user name@example.com").is_err());
        assert!(email("user@@example.com").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("user@.com").is_err());
        assert!(email("user@com.").is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(password("12345678").is_ok());
        assert!(password("1234567890123456").is_ok());
        assert!(password("1234567").is_err());
        assert!(password("12345678901234567").is_err());
    }

    #[test]
    fn phone_is_nine_digits() {
        assert_eq!(phone("612345678"), Ok(612345678));
        assert!(phone("61234567").is_err());
        assert!(phone("6123456789").is_err());
        assert!(phone("61234567a").is_err());
        assert!(phone("+34612345").is_err());
    }

    #[test]
    fn rate_bounds() {
        assert!(rate(0).is_ok());
        assert!(rate(5).is_ok());
        assert!(rate(-1).is_err());
        assert!(rate(6).is_err());
    }

    #[test]
    fn errors_fill_placeholders() {
        let mut errors = Errors::default();
        errors.add("email", "invalid email address");
        let page = "<i>{email_error}</i><i>{password_error}</i>".to_string();
        assert_eq!(
            errors.apply(page, &["email", "password"]),
            "<i>invalid email address</i><i></i>"
        );
    }
}
