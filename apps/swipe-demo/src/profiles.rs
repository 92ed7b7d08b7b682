use swipedeck_card::{CardContent, ContentHandlers, ContentProps};

#[derive(Debug, Clone)]
pub struct Profile {
    pub name: &'static str,
    pub age: u8,
    pub description: &'static str,
    pub hobbies: &'static [&'static str],
}

pub fn sample_profiles() -> Vec<Profile> {
    vec![
        Profile {
            name: "Ada",
            age: 36,
            description: "Writes notes longer than the paper they annotate.",
            hobbies: &["mathematics", "poetry", "horses"],
        },
        Profile {
            name: "Grace",
            age: 41,
            description: "Carries a nanosecond of wire in her handbag.",
            hobbies: &["compilers", "sailing"],
        },
        Profile {
            name: "Linus",
            age: 29,
            description: "Prefers email to meetings and patches to email.",
            hobbies: &["kernels", "diving", "penguins"],
        },
        Profile {
            name: "Barbara",
            age: 33,
            description: "Substitutes freely, as long as behaviour is preserved.",
            hobbies: &["abstraction", "running"],
        },
        Profile {
            name: "Edsger",
            age: 47,
            description: "Considers this profile harmful.",
            hobbies: &["fountain pens", "proofs"],
        },
    ]
}

/// Prints a card's content to stdout the way a list renderer would lay it
/// out, honouring the flags for the current view mode.
#[derive(Default)]
pub struct TextContent {
    pub lines: Vec<String>,
}

impl CardContent<Profile> for TextContent {
    fn render(&mut self, props: &ContentProps<'_, Profile>, _handlers: &ContentHandlers) {
        let profile = props.payload;
        self.lines.clear();
        self.lines.push(format!("{}, {}", profile.name, profile.age));
        if props.flags.show_description {
            self.lines.push(format!("  {}", profile.description));
        }
        if props.flags.show_hobbies {
            self.lines.push(format!("  hobbies: {}", profile.hobbies.join(", ")));
        }
        if props.flags.show_buttons {
            self.lines.push("  [ nope ]   [ like ]".to_string());
        }
    }
}
