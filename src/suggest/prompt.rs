//! Prompt construction for gift suggestions.
//!
//! Pure functions of their inputs: for a fixed `(name, bio, age, refinement)`
//! tuple the output is byte-identical across calls. Absent fields render as
//! an explicit placeholder so the prompt shape stays stable.

/// Placeholder for absent bio/age fields.
const NOT_AVAILABLE: &str = "not available";

/// A composed system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftPrompt {
    pub system: String,
    pub user: String,
}

/// Compose the prompt pair for one suggestion request.
pub fn build_gift_prompt(
    name: &str,
    bio: Option<&str>,
    age: Option<u32>,
    refinement: Option<&str>,
) -> GiftPrompt {
    let mut system = String::from(
        "You are a thoughtful gift concierge.\n\
         - Suggest exactly 3 realistic gift ideas.\n\
         - Every idea must name a specific product, brand, title, or experience; never a bare category.\n\
         - Spread the three ideas across ascending price bands: one low, one medium, one high.\n\
         - Cover at least one experience and at least one tangible item.\n\
         - Infer interests from the bio subtly; never quote it verbatim.\n\
         - Weight age-appropriateness when an age is given.\n\
         - Alongside the ideas, offer 3 short follow-up refinements of 3 words or fewer each.\n\
         Always respond by calling the suggest_gifts function; never answer in free text.",
    );

    if let Some(tag) = refinement {
        system.push_str("\nThe user picked the refinement \"");
        system.push_str(tag);
        system.push_str(
            "\". Let it dominate this suggestion set; treat it as the main theme, not a minor nudge.",
        );
    }

    let mut user = String::with_capacity(128);
    user.push_str("Name: \"");
    user.push_str(name);
    user.push_str("\"\nBio: ");
    match bio {
        Some(bio) if !bio.trim().is_empty() => {
            user.push('"');
            user.push_str(bio);
            user.push('"');
        }
        _ => user.push_str(NOT_AVAILABLE),
    }
    user.push_str("\nAge: ");
    match age {
        Some(age) => user.push_str(&age.to_string()),
        None => user.push_str(NOT_AVAILABLE),
    }
    if let Some(tag) = refinement {
        user.push_str("\nRefinement: focus the whole set on \"");
        user.push_str(tag);
        user.push_str("\".");
    }

    GiftPrompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_gift_prompt("Alex", Some("loves jazz and plants"), Some(34), None);
        let b = build_gift_prompt("Alex", Some("loves jazz and plants"), Some(34), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_absent_fields_render_placeholders() {
        let prompt = build_gift_prompt("Sam", None, None, None);
        assert!(prompt.user.contains("Bio: not available"));
        assert!(prompt.user.contains("Age: not available"));
        // empty bio is the same as no bio
        let blank = build_gift_prompt("Sam", Some("   "), None, None);
        assert_eq!(blank.user, prompt.user);
    }

    #[test]
    fn test_concrete_values_embedded() {
        let prompt = build_gift_prompt("Alex", Some("loves jazz"), Some(34), None);
        assert!(prompt.user.contains("Name: \"Alex\""));
        assert!(prompt.user.contains("Bio: \"loves jazz\""));
        assert!(prompt.user.contains("Age: 34"));
        assert!(!prompt.system.contains("dominate"));
        assert!(!prompt.user.contains("Refinement:"));
    }

    #[test]
    fn test_refinement_dominates_both_prompts() {
        let prompt = build_gift_prompt("Alex", Some("loves jazz"), Some(34), Some("vinyl records"));
        assert!(prompt.system.contains("\"vinyl records\""));
        assert!(prompt.system.contains("dominate"));
        assert!(prompt
            .user
            .contains("Refinement: focus the whole set on \"vinyl records\"."));
    }
}
