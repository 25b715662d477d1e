//! Prompt Composer
//!
//! Turns a `PromptRequest` into the single instruction string sent to the
//! inference endpoint.
//!
//! Each mode has a fixed template describing the structure the model should
//! follow (clause counts, speech length, number of actions). The composer only
//! writes those instructions; it never checks the generated text against them.
//!
//! Rendering is total and pure: the same five inputs always produce the same
//! non-empty string, and leading/trailing newlines from the template are kept.

mod mode;
mod registry;

pub use mode::{Mode, ModeSelection};
pub use registry::{Committee, CountryProfile, DEFAULT_PROFILE, Registry};

/// Structured user intent for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub mode: ModeSelection,
    pub country: String,
    pub committee: String,
    pub topic: String,
    pub question: String,
}

impl PromptRequest {
    pub fn new(
        mode: impl Into<ModeSelection>,
        country: impl Into<String>,
        committee: impl Into<String>,
        topic: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            country: country.into(),
            committee: committee.into(),
            topic: topic.into(),
            question: question.into(),
        }
    }
}

/// Values substituted into a template
struct Slots<'a> {
    country: &'a str,
    committee: &'a str,
    stance: &'a str,
    priorities: String,
    allies: String,
    topic: &'a str,
    question: &'a str,
}

/// Renders mode templates against the registry
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer {
    registry: Registry,
}

impl PromptComposer {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render a request
    pub fn compose_request(&self, request: &PromptRequest) -> String {
        self.compose(
            &request.mode,
            &request.country,
            &request.committee,
            &request.topic,
            &request.question,
        )
    }

    /// Render the template for `mode`
    pub fn compose(
        &self,
        mode: &ModeSelection,
        country: &str,
        committee: &str,
        topic: &str,
        question: &str,
    ) -> String {
        let profile = self.registry.country(country);
        let slots = Slots {
            country,
            committee: self.registry.committee_name(committee),
            stance: profile.stance,
            priorities: profile.priorities.join(", "),
            allies: profile.allies.join(", "),
            topic,
            question,
        };

        match mode {
            ModeSelection::Known(Mode::PositionPaper) => position_paper(&slots),
            ModeSelection::Known(Mode::ResolutionDrafting) => resolution_drafting(&slots),
            ModeSelection::Known(Mode::DebateSpeech) => debate_speech(&slots),
            ModeSelection::Known(Mode::CrisisResponse) => crisis_response(&slots),
            ModeSelection::Known(Mode::NegotiationStrategy) => negotiation_strategy(&slots),
            ModeSelection::Known(Mode::ResearchBrief) => research_brief(&slots),
            ModeSelection::Unrecognized(_) => generic(&slots),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

fn position_paper(s: &Slots<'_>) -> String {
    format!(
        "
You are representing {country} in the {committee}.
Country stance: {stance}
Key priorities: {priorities}

Write a concise position paper for {country} on the topic: \"{topic}\"
Include:
1) Official position (1 short paragraph)
2) Historical context & national interest (2-3 short bullet points)
3) Proposed solutions (3 concrete, implementable points)
4) Areas for international cooperation (2 bullets)

Position Paper:
",
        country = s.country,
        committee = s.committee,
        stance = s.stance,
        priorities = s.priorities,
        topic = s.topic,
    )
}

fn resolution_drafting(s: &Slots<'_>) -> String {
    format!(
        "
You are drafting a formal UN resolution for the {committee} on \"{topic}\".
Leading sponsor: {country}

Draft a UN-style resolution with:
- 5 preambulatory clauses
- 6 operative clauses (clear actions, responsible parties, and timelines where possible)
- Use formal diplomatic language

Resolution:
",
        committee = s.committee,
        topic = s.topic,
        country = s.country,
    )
}

fn debate_speech(s: &Slots<'_>) -> String {
    format!(
        "
You are the delegate of {country} speaking in the {committee}.
Topic: {topic}
Country priorities: {priorities}

Deliver a 2-minute speech addressing: {question}
Use formal diplomatic tone, reference the country's position, and propose 2-3 concrete policy steps.
Speech:
",
        country = s.country,
        committee = s.committee,
        topic = s.topic,
        priorities = s.priorities,
        question = s.question,
    )
}

fn crisis_response(s: &Slots<'_>) -> String {
    format!(
        "
CRISIS UPDATE: {question}
Topic: {topic}
You are {country}'s delegate in {committee}.
Respond considering national interests, regional security, international law, and diplomatic relations.
Provide an immediate statement (2 short paragraphs) and 3 recommended actions.

Crisis Response:
",
        question = s.question,
        topic = s.topic,
        country = s.country,
        committee = s.committee,
    )
}

fn negotiation_strategy(s: &Slots<'_>) -> String {
    format!(
        "
You are strategizing for {country} in {committee}.
Topic: {topic}
Allies: {allies}

Provide a negotiation plan: key talking points, potential allies/opponents, compromise positions, and clear red lines.

Strategy:
",
        country = s.country,
        committee = s.committee,
        topic = s.topic,
        allies = s.allies,
    )
}

fn research_brief(s: &Slots<'_>) -> String {
    format!(
        "
Research briefing for {country}'s delegation to {committee} on: {topic}
Provide: 1) succinct background, 2) key facts & (where to check them), 3) stakeholders, 4) previous UN actions, 5) suggested next steps.

Brief:
",
        country = s.country,
        committee = s.committee,
        topic = s.topic,
    )
}

fn generic(s: &Slots<'_>) -> String {
    format!("MUN Question: {}\n\nAnswer:", s.question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn compose(mode: Mode, country: &str, committee: &str) -> String {
        PromptComposer::default().compose(
            &ModeSelection::Known(mode),
            country,
            committee,
            "Climate Change and Security",
            "How should we respond to rising sea levels?",
        )
    }

    #[test]
    fn test_position_paper_uses_profile() {
        let prompt = compose(Mode::PositionPaper, "USA", "UNSC");
        assert!(prompt.contains("You are representing USA in the United Nations Security Council."));
        assert!(prompt.contains("Country stance: Western democratic"));
        assert!(prompt.contains("Key priorities: Security, Democracy, Free Trade"));
        assert!(prompt.contains("on the topic: \"Climate Change and Security\""));
        assert!(prompt.starts_with('\n'));
        assert!(prompt.ends_with("Position Paper:\n"));
    }

    #[test]
    fn test_resolution_clause_counts() {
        let prompt = compose(Mode::ResolutionDrafting, "France", "UNEP");
        assert!(prompt.contains("- 5 preambulatory clauses"));
        assert!(prompt.contains("- 6 operative clauses"));
        assert!(prompt.contains("Leading sponsor: France"));
        assert!(prompt.contains("United Nations Environment Programme"));
    }

    #[test]
    fn test_debate_speech_carries_question() {
        let prompt = compose(Mode::DebateSpeech, "India", "UNGA");
        assert!(prompt.contains("2-minute speech addressing: How should we respond"));
        assert!(prompt.contains("propose 2-3 concrete policy steps"));
        assert!(prompt.contains("Country priorities: Development, South-South Cooperation"));
    }

    #[test]
    fn test_crisis_response_structure() {
        let prompt = compose(Mode::CrisisResponse, "Japan", "UNSC");
        assert!(prompt.starts_with("\nCRISIS UPDATE: How should we respond"));
        assert!(prompt.contains("You are Japan's delegate in United Nations Security Council."));
        assert!(prompt.contains("3 recommended actions"));
    }

    #[test]
    fn test_negotiation_lists_allies() {
        let prompt = compose(Mode::NegotiationStrategy, "Russia", "UNSC");
        assert!(prompt.contains("Allies: China, Belarus"));
        assert!(prompt.contains("clear red lines"));
    }

    #[test]
    fn test_research_brief() {
        let prompt = compose(Mode::ResearchBrief, "Brazil", "ECOSOC");
        assert!(prompt.contains(
            "Research briefing for Brazil's delegation to Economic and Social Council on: Climate Change and Security"
        ));
    }

    #[test]
    fn test_unrecognized_mode_uses_generic_template() {
        let prompt = PromptComposer::default().compose(
            &ModeSelection::parse("Press Conference"),
            "USA",
            "UNSC",
            "Cyber Security",
            "What is a caucus?",
        );
        assert_eq!(prompt, "MUN Question: What is a caucus?\n\nAnswer:");
    }

    #[test]
    fn test_unknown_country_uses_default_profile() {
        let prompt = compose(Mode::PositionPaper, "Atlantis", "UNGA");
        assert!(prompt.contains("Country stance: Neutral"));
        assert!(prompt.contains("Key priorities: Peace, Development"));

        let strategy = compose(Mode::NegotiationStrategy, "Atlantis", "UNGA");
        assert!(strategy.contains("Allies: Various"));
    }

    #[test]
    fn test_unknown_committee_is_echoed() {
        let prompt = compose(Mode::DebateSpeech, "UK", "DISEC");
        assert!(prompt.contains("speaking in the DISEC."));
    }

    #[test]
    fn test_compose_request_matches_compose() {
        let composer = PromptComposer::default();
        let request = PromptRequest::new(Mode::ResearchBrief, "China", "WHO", "Pandemics", "q");
        assert_eq!(
            composer.compose_request(&request),
            composer.compose(&request.mode, "China", "WHO", "Pandemics", "q")
        );
    }

    fn known_or_random_country() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec!["USA", "India", "South Africa", "Kenya"])
                .prop_map(String::from),
            "\\PC{1,20}",
        ]
    }

    proptest! {
        #[test]
        fn prop_every_mode_contains_inputs(
            mode in prop::sample::select(Mode::ALL.to_vec()),
            country in known_or_random_country(),
            committee in prop::sample::select(vec!["UNSC", "HRC", "UNESCO", "G20"]),
            topic in "\\PC{1,40}",
            question in "\\PC{1,40}",
        ) {
            let composer = PromptComposer::default();
            let prompt = composer.compose(&ModeSelection::Known(mode), &country, committee, &topic, &question);
            let committee_name = composer.registry().committee_name(committee);

            prop_assert!(!prompt.is_empty());
            prop_assert!(prompt.contains(&topic));
            prop_assert!(prompt.contains(&country));
            prop_assert!(prompt.contains(committee_name));
        }

        #[test]
        fn prop_compose_is_deterministic(
            raw_mode in "\\PC{0,20}",
            topic in "\\PC{0,20}",
            question in "\\PC{0,20}",
        ) {
            let composer = PromptComposer::default();
            let mode = ModeSelection::parse(&raw_mode);
            let first = composer.compose(&mode, "USA", "UNSC", &topic, &question);
            let second = composer.compose(&mode, "USA", "UNSC", &topic, &question);
            prop_assert_eq!(&first, &second);
            prop_assert!(!first.is_empty());
        }
    }
}
