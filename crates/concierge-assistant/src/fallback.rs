//! Local canned-response generator.
//!
//! When the remote generation endpoint is unreachable or misbehaves, a
//! reply is selected from this fixed table by keyword-matching the user's
//! utterance. The table is part of the gateway contract: the widgets
//! never show a raw error state for a failed generation call.

use crate::gateway::AssistantReply;

struct FallbackTopic {
    keywords: &'static [&'static str],
    text: &'static str,
    options: &'static [&'static str],
}

// Checked in order; first match wins.
static TOPICS: &[FallbackTopic] = &[
    FallbackTopic {
        keywords: &["service", "what do you do"],
        text: "We offer comprehensive digital solutions including:\n\n\u{2022} Web Design & Development\n\u{2022} E-commerce Solutions\n\u{2022} Web Applications\n\u{2022} Mobile App Development (iOS & Android)\n\u{2022} Student Mentorship Program\n\nWhich service interests you most?",
        options: &["Web Development", "E-commerce", "Mobile Apps", "Student Program"],
    },
    FallbackTopic {
        keywords: &["appointment", "schedule", "meeting"],
        text: "I'd be happy to help you schedule an appointment! You can:\n\n\u{1f4c5} Book online through our calendar\n\u{1f4de} Call us at +91 8220123488\n\u{2709}\u{fe0f} Email us at support@ctrlplustech.com\n\nWhat type of appointment would you like to schedule?",
        options: &["Project Consultation", "Student Program Info", "Technical Support", "General Inquiry"],
    },
    FallbackTopic {
        keywords: &["student", "program", "mentorship"],
        text: "Our Student Mentorship Program bridges the gap between college and career:\n\n\u{2705} Real project experience\n\u{2705} Professional mentorship\n\u{2705} Paid opportunities\n\u{2705} Career guidance\n\nAre you interested in applying or learning more?",
        options: &["Apply Now", "Program Details", "Success Stories", "Requirements"],
    },
    FallbackTopic {
        keywords: &["web development", "website"],
        text: "Our web development services include:\n\n\u{1f3a8} Custom Design\n\u{1f4f1} Responsive Development\n\u{26a1} Fast Loading\n\u{1f50d} SEO Optimized\n\u{1f6e1}\u{fe0f} Secure & Reliable\n\nWould you like to see examples or get a quote?",
        options: &["View Portfolio", "Get Quote", "Schedule Demo", "Technical Details"],
    },
    FallbackTopic {
        keywords: &["mobile", "app"],
        text: "We develop native mobile apps for:\n\n\u{1f4f1} iOS (Swift)\n\u{1f916} Android (Kotlin)\n\u{26a1} Cross-platform (React Native/Flutter)\n\nFeatures include offline functionality, push notifications, and app store optimization. What type of app are you planning?",
        options: &["iOS App", "Android App", "Cross-Platform", "App Features"],
    },
    FallbackTopic {
        keywords: &["ecommerce", "online store", "shop"],
        text: "Our e-commerce solutions include:\n\n\u{1f6d2} Custom online stores\n\u{1f4b3} Payment gateway integration\n\u{1f4e6} Inventory management\n\u{1f4ca} Analytics & reporting\n\u{1f512} Security & compliance\n\nWhat type of products will you be selling?",
        options: &["Physical Products", "Digital Products", "Services", "Marketplace"],
    },
];

static DEFAULT_TEXT: &str = "I'd be happy to help! You can ask me about:\n\n\u{2022} Our services\n\u{2022} Scheduling appointments\n\u{2022} Student mentorship program\n\u{2022} Technical questions\n\nOr feel free to ask anything else!";

static DEFAULT_OPTIONS: &[&str] = &["Our Services", "Schedule Meeting", "Student Program", "Contact Info"];

/// Keyword-matched canned replies for when the remote path is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackResponder;

impl FallbackResponder {
    pub fn new() -> Self {
        Self
    }

    /// Select a reply for the utterance. Always succeeds.
    pub fn respond(&self, utterance: &str) -> AssistantReply {
        let lower = utterance.to_lowercase();

        for topic in TOPICS {
            if topic.keywords.iter().any(|kw| lower.contains(kw)) {
                return AssistantReply {
                    text: topic.text.to_string(),
                    quick_replies: Some(topic.options.iter().map(|s| s.to_string()).collect()),
                };
            }
        }

        AssistantReply {
            text: DEFAULT_TEXT.to_string(),
            quick_replies: Some(DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_keyword() {
        let reply = FallbackResponder::new().respond("What services do you offer?");
        assert!(reply.text.contains("Web Design & Development"));
        let options = reply.quick_replies.unwrap();
        assert!(options.contains(&"E-commerce".to_string()));
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn test_schedule_keyword_mentions_appointment_options() {
        let reply = FallbackResponder::new().respond("can I schedule something");
        assert!(reply.text.contains("schedule an appointment"));
        assert!(reply
            .quick_replies
            .unwrap()
            .contains(&"Project Consultation".to_string()));
    }

    #[test]
    fn test_meeting_keyword_matches_scheduling() {
        let reply = FallbackResponder::new().respond("I want a meeting next week");
        assert!(reply.text.contains("appointment"));
    }

    #[test]
    fn test_student_keyword() {
        let reply = FallbackResponder::new().respond("tell me about the student mentorship");
        assert!(reply.text.contains("Student Mentorship Program"));
        assert!(reply.quick_replies.unwrap().contains(&"Apply Now".to_string()));
    }

    #[test]
    fn test_website_keyword() {
        let reply = FallbackResponder::new().respond("I need a website built");
        assert!(reply.text.contains("web development services"));
    }

    #[test]
    fn test_mobile_keyword() {
        let reply = FallbackResponder::new().respond("do you build mobile apps?");
        // "mobile" appears before the e-commerce rules; app topic wins.
        assert!(reply.text.contains("native mobile apps"));
        assert!(reply.quick_replies.unwrap().contains(&"iOS App".to_string()));
    }

    #[test]
    fn test_ecommerce_keyword() {
        let reply = FallbackResponder::new().respond("I want an online store");
        assert!(reply.text.contains("e-commerce solutions"));
    }

    #[test]
    fn test_default_reply_for_unmatched() {
        let reply = FallbackResponder::new().respond("zzzzz unrelated");
        assert!(reply.text.contains("I'd be happy to help!"));
        assert_eq!(
            reply.quick_replies.unwrap(),
            vec!["Our Services", "Schedule Meeting", "Student Program", "Contact Info"]
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let reply = FallbackResponder::new().respond("SCHEDULE AN APPOINTMENT");
        assert!(reply.text.contains("appointment"));
    }

    #[test]
    fn test_first_topic_wins_on_overlap() {
        // "service" and "appointment" both present; services is checked first.
        let reply = FallbackResponder::new().respond("service appointment");
        assert!(reply.text.contains("comprehensive digital solutions"));
    }

    #[test]
    fn test_every_reply_has_quick_replies() {
        let responder = FallbackResponder::new();
        for utterance in ["services", "schedule", "student", "website", "mobile", "shop", "???"] {
            let reply = responder.respond(utterance);
            let options = reply.quick_replies.expect("fallback reply without options");
            assert!(!options.is_empty());
            assert!(options.len() <= 4);
        }
    }
}
