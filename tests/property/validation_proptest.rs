//! Property-based tests for request validation

use proptest::prelude::*;
use skillforge::backend::auth::handlers::RegisterRequest;
use skillforge::shared::types::Track;

fn request(password: String, track: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Prop Student".to_string(),
        email: "prop@example.com".to_string(),
        whatsapp_number: "+10000000".to_string(),
        password,
        track: track.to_string(),
    }
}

proptest! {
    #[test]
    fn test_short_passwords_are_rejected(password in "[a-z0-9]{0,5}") {
        let errors = request(password, "Photography").validate().unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_long_enough_passwords_pass(password in "[a-zA-Z0-9]{6,40}", index in 0usize..3) {
        let track = Track::ALL[index];
        prop_assert_eq!(request(password, track.as_str()).validate().unwrap(), track);
    }

    #[test]
    fn test_unknown_tracks_are_rejected(track in "[a-z ]{1,20}") {
        prop_assume!(track.parse::<Track>().is_err());
        let errors = request("secret123".to_string(), &track).validate().unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].field.as_str(), "track");
    }
}
