use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct UserEmail(pub String);

impl UserEmail {
    pub fn parse(value: String) -> Result<UserEmail, anyhow::Error> {
        if value.validate_email() {
            Ok(UserEmail(value))
        } else {
            Err(anyhow::anyhow!("{} is not a valid email address", value))
        }
    }

    pub fn inner(&self) -> &str {
        &self.0
    }
}
