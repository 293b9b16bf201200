//! Persona identity — the resume context and the system prompt template.
//!
//! The persona answers *as* the portfolio owner, in first person, grounded
//! in the resume text. The template is fixed; the resume context and
//! contact details are interpolated from configuration.

use foliochat_config::{ContactConfig, IdentityConfig};
use std::path::Path;
use tracing::{info, warn};

/// The loaded persona: who the chatbot answers as, and with what knowledge.
#[derive(Debug, Clone)]
pub struct Identity {
    /// First name the persona answers as
    pub persona_name: String,

    /// Resume/context text the persona draws from
    pub context: String,

    /// Contact details quoted in the prompt
    pub contact: ContactConfig,
}

impl Identity {
    /// Load the persona from configuration.
    ///
    /// A missing context file is not fatal: the persona falls back to a
    /// one-line self-description so the service still starts.
    pub fn load(identity: &IdentityConfig, contact: &ContactConfig) -> Self {
        let context = match std::fs::read_to_string(Path::new(&identity.context_file)) {
            Ok(text) => {
                info!(path = %identity.context_file, chars = text.chars().count(), "Persona context loaded");
                text
            }
            Err(_) => {
                warn!(path = %identity.context_file, "Context file not found, using fallback");
                format!(
                    "I am {}, a software engineer passionate about AI and technology.",
                    identity.persona_name
                )
            }
        };

        Self {
            persona_name: identity.persona_name.clone(),
            context,
            contact: contact.clone(),
        }
    }

    /// Build the system prompt that defines the persona.
    pub fn system_prompt(&self) -> String {
        let name = &self.persona_name;
        format!(
            "You are {name}, responding to messages as if you are him personally. \
Use the following resume and professional information about {name} to inform your responses:

{context}

IMPORTANT INSTRUCTIONS:
1. Respond as {name} in first person (use \"I\", \"my\", \"me\")
2. Be conversational and professional, as if you are {name} himself
3. Draw from {name}'s background, experience, and expertise when relevant
4. If asked about technical topics, provide insights based on {name}'s actual experience from the resume
5. Stay in character as {name} throughout the conversation
6. Be encouraging and supportive, especially for career-related questions
7. Focus on information that's actually in the resume - don't make up details
8. Keep responses focused and practical
9. Use a professional yet approachable tone
10. Provide responses in markdown format for better frontend rendering
11. When discussing projects, refer to the specific work mentioned in the resume
12. For contact information, use the details provided in the resume

CONTACT DETAILS FROM RESUME:
- Email: {email}
- Phone: {phone}
- GitHub: {github}
- LinkedIn: {linkedin}

Remember: You ARE {name}, not an AI assistant representing him. \
Base all responses on the actual information in the resume provided above.",
            context = self.context,
            email = self.contact.email,
            phone = self.contact.phone,
            github = self.contact.github,
            linkedin = self.contact.linkedin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn contact() -> ContactConfig {
        ContactConfig {
            email: "me@example.com".into(),
            phone: "+1-555-0100".into(),
            github: "https://github.com/me".into(),
            linkedin: "https://linkedin.com/in/me".into(),
        }
    }

    #[test]
    fn loads_context_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "Ten years of distributed systems experience.").unwrap();

        let identity_cfg = IdentityConfig {
            persona_name: "Satish".into(),
            context_file: tmp.path().to_string_lossy().into_owned(),
        };
        let identity = Identity::load(&identity_cfg, &contact());
        assert!(identity.context.contains("distributed systems"));
    }

    #[test]
    fn missing_context_file_falls_back() {
        let identity_cfg = IdentityConfig {
            persona_name: "Satish".into(),
            context_file: "/nonexistent/resume.txt".into(),
        };
        let identity = Identity::load(&identity_cfg, &contact());
        assert!(identity.context.contains("I am Satish"));
    }

    #[test]
    fn system_prompt_interpolates_everything() {
        let identity = Identity {
            persona_name: "Satish".into(),
            context: "Resume body here.".into(),
            contact: contact(),
        };
        let prompt = identity.system_prompt();
        assert!(prompt.starts_with("You are Satish"));
        assert!(prompt.contains("Resume body here."));
        assert!(prompt.contains("me@example.com"));
        assert!(prompt.contains("https://github.com/me"));
        assert!(prompt.contains("Stay in character as Satish"));
    }
}
