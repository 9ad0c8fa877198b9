/// The two addresses allowed to share a journal, trimmed and lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoupleEmails {
    first: String,
    second: String,
}

impl CoupleEmails {
    pub fn new(first: &str, second: &str) -> Result<Self, String> {
        let first = normalize(first);
        let second = normalize(second);

        if first.is_empty() || second.is_empty() {
            return Err("COUPLE_EMAILS entries must not be empty".to_string());
        }
        if first == second {
            return Err("COUPLE_EMAILS must name two different addresses".to_string());
        }

        Ok(Self { first, second })
    }

    /// Parses `a@x.com,b@y.com`.
    pub fn parse(csv: &str) -> Result<Self, String> {
        let parts: Vec<&str> = csv.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();

        match parts.as_slice() {
            [first, second] => Self::new(first, second),
            _ => Err(format!(
                "COUPLE_EMAILS must contain exactly two addresses, found {}",
                parts.len()
            )),
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, email: &str) -> bool {
        let email = normalize(email);
        email == self.first || email == self.second
    }

    pub fn both(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}
