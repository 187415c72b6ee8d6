//! UUID utilities
//!
//! Every surrogate key in the obras schema is a UUIDv4 stored as TEXT.

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Generate a new UUIDv4 in the TEXT form stored in the database
pub fn generate_id() -> String {
    generate().to_string()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_parses_back() {
        let id = generate_id();
        let parsed = parse(&id).expect("generated id should parse");
        assert_eq!(parsed.to_string(), id);
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(generate_id(), generate_id());
    }
}
