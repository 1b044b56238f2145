//! Input validation utilities

use crate::constants;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    if !username.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false) {
        return Err("Username must start with a letter");
    }
    Ok(())
}

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("Invalid email format");
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format");
    }
    if !parts[1].contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters");
    }
    Ok(())
}

/// Validate an OTP code's shape before hitting the store
pub fn validate_otp_code(code: &str) -> Result<(), &'static str> {
    if code.len() != constants::OTP_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("OTP must be a 6-digit code");
    }
    Ok(())
}

/// Validate ride recurrence
pub fn validate_frequency(frequency: &str) -> Result<(), &'static str> {
    if constants::frequencies::ALL.contains(&frequency) {
        Ok(())
    } else {
        Err("Invalid ride frequency")
    }
}

/// Validate trip type
pub fn validate_trip_type(trip_type: &str) -> Result<(), &'static str> {
    if constants::trip_types::ALL.contains(&trip_type) {
        Ok(())
    } else {
        Err("Invalid trip type")
    }
}

/// Validate vehicle type
pub fn validate_vehicle_type(vehicle_type: &str) -> Result<(), &'static str> {
    if constants::vehicle_types::ALL.contains(&vehicle_type) {
        Ok(())
    } else {
        Err("Invalid vehicle type")
    }
}

/// Validate preferred contact method
pub fn validate_contact_method(method: &str) -> Result<(), &'static str> {
    if constants::contact_methods::ALL.contains(&method) {
        Ok(())
    } else {
        Err("Invalid contact method")
    }
}

/// Validate a ride lifecycle status
pub fn validate_ride_status(status: &str) -> Result<(), &'static str> {
    if constants::ride_statuses::ALL.contains(&status) {
        Ok(())
    } else {
        Err("Invalid ride status")
    }
}

/// Validate a moderation decision
pub fn validate_moderation_status(status: &str) -> Result<(), &'static str> {
    if constants::moderation_statuses::ALL.contains(&status) {
        Ok(())
    } else {
        Err("Invalid moderation status")
    }
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_123").is_ok());
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username("123abc").is_err()); // Starts with number
        assert!(validate_username("user@name").is_err()); // Invalid character
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("student@nust.edu.pk").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_otp_code() {
        assert!(validate_otp_code("123456").is_ok());
        assert!(validate_otp_code("12345").is_err());
        assert!(validate_otp_code("1234567").is_err());
        assert!(validate_otp_code("12345a").is_err());
    }

    #[test]
    fn test_validate_enum_values() {
        assert!(validate_frequency("daily").is_ok());
        assert!(validate_frequency("hourly").is_err());

        assert!(validate_trip_type("one-way").is_ok());
        assert!(validate_trip_type("round-trip").is_ok());
        assert!(validate_trip_type("loop").is_err());

        assert!(validate_vehicle_type("car").is_ok());
        assert!(validate_vehicle_type("bike").is_ok());
        assert!(validate_vehicle_type("bus").is_err());

        assert!(validate_contact_method("whatsapp").is_ok());
        assert!(validate_contact_method("carrier-pigeon").is_err());

        assert!(validate_ride_status("active").is_ok());
        assert!(validate_ride_status("archived").is_err());

        assert!(validate_moderation_status("pending").is_ok());
        assert!(validate_moderation_status("approved").is_ok());
        assert!(validate_moderation_status("rejected").is_ok());
        assert!(validate_moderation_status("escalated").is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello \u{0007}world  "), "hello world");
    }
}
