//! Quick-reply curation for remote replies.
//!
//! The remote model only produces text; the tappable follow-up options
//! offered next to it are always chosen here, by simple keyword rules
//! over the utterance and the reply.

/// Choose 3-4 follow-up options for a generated reply.
pub fn suggest_options(utterance: &str, reply_text: &str) -> Vec<String> {
    let message = utterance.to_lowercase();
    let reply = reply_text.to_lowercase();

    let options: &[&str] = if message.contains("service") || reply.contains("service") {
        &["Web Development", "E-commerce", "Mobile Apps", "Get Quote"]
    } else if message.contains("appointment") || message.contains("schedule") {
        &["Project Consultation", "Student Program Info", "Technical Support", "Call Now"]
    } else if message.contains("student") || message.contains("program") {
        &["Apply Now", "Program Details", "Requirements", "Success Stories"]
    } else if message.contains("price") || message.contains("cost") {
        &["Get Quote", "View Packages", "Schedule Consultation", "Compare Options"]
    } else if message.contains("portfolio") || message.contains("example") {
        &["View Portfolio", "Case Studies", "Client Reviews", "Schedule Demo"]
    } else {
        &["Our Services", "Schedule Meeting", "Get Quote", "Contact Info"]
    };

    options.iter().map(|s| s.to_string()).collect()
}
