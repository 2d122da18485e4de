//! Prompt assembly for the two comment styles.
//!
//! The RESTRICTIONS block used on regeneration is appended by the diversity
//! gate, not here.

use crate::config::{CommentStyle, GenerationConfig, Tone};
use crate::post::{SourcePost, UserProfile};

const PROFESSIONAL_EXAMPLES_WITH_QUESTIONS: &str = r#"SUCCESSFUL EXAMPLES:
"This story highlights the often-overlooked value of grit and resilience alongside technical skill. I wonder how many talented individuals are overlooked because they don't fit a traditional hiring mold?"

"Love this simple yet powerful habit! I've found that reflecting on even small wins cultivates a much-needed sense of accomplishment and fuels motivation for the next day. What's been your biggest surprise from tracking your daily wins?"

"Great reminder about often-overlooked hygiene! I wonder if the type of can material impacts the risk of contamination, perhaps aluminum is less porous than steel?"

"The initial grind is intense. Your point about delegating after establishing a system is key; what tools or strategies did you find most effective for that transition?""#;

const PROFESSIONAL_EXAMPLES: &str = r#"SUCCESSFUL EXAMPLES:
"This story highlights the often-overlooked value of grit and resilience alongside technical skill. So many talented individuals are overlooked simply because they don't fit traditional hiring molds."

"Love this simple yet powerful habit! Reflecting on even small wins cultivates a much-needed sense of accomplishment and fuels motivation for the next day."

"Great reminder about often-overlooked hygiene! The type of can material likely impacts contamination risk, aluminum being less porous than steel."

"The initial grind is intense. Your point about delegating after establishing a system is absolutely key to sustainable growth.""#;

const HUMAN_EXAMPLES_WITH_QUESTIONS: &str = r#""Love this simple yet powerful habit! I've found that reflecting on even small wins cultivates a much-needed sense of accomplishment and fuels motivation for the next day. What's been your biggest surprise from tracking your daily wins?"

"So true! It seems 'culture' is often the ghost in the machine, invisible until it malfunctions spectacularly (or beautifully). What's the weirdest cultural quirk you've encountered that really defined a company?"

"Great reminder about often-overlooked hygiene! I wonder if the type of can material impacts the risk of contamination, perhaps aluminum is less porous than steel?"

"The initial grind is intense. Your point about delegating after establishing a system is key; what tools or strategies did you find most effective for that transition?""#;

const HUMAN_EXAMPLES: &str = r#""Love this simple yet powerful habit! Reflecting on even small wins cultivates a much-needed sense of accomplishment and fuels motivation for the next day."

"So true! Culture is often the ghost in the machine, invisible until it malfunctions spectacularly or beautifully transforms everything."

"Great reminder about often-overlooked hygiene! The type of can material likely impacts contamination risk, aluminum being less porous than steel."

"The initial grind is intense. Your point about delegating after establishing a system is absolutely key to sustainable growth.""#;

/// Tone line plus a one-line example for the professional prompt.
fn professional_tone_cue(tone: Tone) -> &'static str {
    match tone {
        Tone::Supportive => {
            "TONE: supportive. Affirm the point, add one practical tip, and keep language warm.\n\
             EXAMPLE: \"Appreciate this reminder. Small, consistent behaviors like this change outcomes over time.\""
        }
        Tone::Excited => {
            "TONE: excited. Show controlled enthusiasm about momentum or results (one exclamation max). Focus on what's next.\n\
             EXAMPLE: \"Love the energy here. This unlocks faster learning loops for teams.\""
        }
        Tone::Happy => {
            "TONE: positive and upbeat. Keep it friendly and light; focus on wins without hype.\n\
             EXAMPLE: \"This is refreshing. Simple actions that actually move work forward.\""
        }
        Tone::Gracious => {
            "TONE: appreciative. Acknowledge effort and offer one concise addition.\n\
             EXAMPLE: \"Thanks for laying this out so clearly. One thing that also helps is...\""
        }
        Tone::Polite => {
            "TONE: courteous and respectful. Use neutral, precise language.\n\
             EXAMPLE: \"Clear framing. A helpful complement is ...\""
        }
        Tone::Witty => {
            "TONE: intelligent and lightly playful. One crisp analogy only; keep it professional.\n\
             EXAMPLE: \"This is the 'lint roller' for messy processes: quick, simple, effective.\""
        }
        Tone::Professional => {
            "TONE: professional. Use concise, outcome-focused language; minimize adjectives.\n\
             EXAMPLE: \"This reduces coordination cost and improves throughput across teams.\""
        }
        Tone::Thoughtful => {
            "TONE: thoughtful. Use cause-effect and trade-off language; connect to implications.\n\
             EXAMPLE: \"It shifts attention from outputs to behaviors, which compounds over time.\""
        }
    }
}

/// Style cue for the human-like prompt. Only some tones have one.
fn casual_tone_cue(tone: Tone) -> &'static str {
    match tone {
        Tone::Witty => {
            "STYLE: Keep it light, clever, and a touch playful. Use one subtle metaphor or wordplay, never sarcastic. Avoid formal phrasing.\n\
             EXAMPLE OPENERS:\n\
             - \"Okay, this gave my brain a tiny high-five.\"\n\
             - \"Hot take, but this is the espresso shot most teams need.\"\n\
             PHRASING HINTS: swap \"utilize\" for \"use\", \"therefore\" for \"so\", sprinkle one smart comparison."
        }
        Tone::Thoughtful => {
            "STYLE: Calm, reflective, and observant. Use cause-and-effect language and connect to broader implications. No punchlines.\n\
             EXAMPLE OPENERS:\n\
             - \"This lands because it treats the root cause, not the symptom.\"\n\
             - \"What I appreciate here is the practical path from idea to behavior.\"\n\
             PHRASING HINTS: use \"it suggests\", \"it nudges\", \"the tradeoff is\", avoid playful metaphors."
        }
        Tone::Excited => {
            "STYLE: High energy, optimistic, forward-looking. One exclamation max. Focus on momentum and next steps."
        }
        Tone::Supportive => {
            "STYLE: Warm and encouraging. Affirm the insight, add one helpful note from experience."
        }
        Tone::Professional => {
            "STYLE: Direct and businesslike. Prioritize clarity and impact over flair."
        }
        Tone::Happy | Tone::Gracious | Tone::Polite => "",
    }
}

/// Profiles that carry context but no experience add nothing to the prompt.
fn experience_of(profile: Option<&UserProfile>) -> Option<String> {
    profile
        .filter(|p| p.has_context())
        .map(UserProfile::experience_summary)
        .filter(|s| !s.is_empty())
}

/// Prompt for `CommentStyle::Professional`.
pub fn professional_prompt(
    post: &SourcePost,
    config: &GenerationConfig,
    profile: Option<&UserProfile>,
) -> String {
    let question_instruction = if config.include_questions {
        "End with a thoughtful question that invites discussion."
    } else {
        "Do NOT include any questions. End with a statement or observation."
    };
    let profile_context = experience_of(profile)
        .map(|exp| format!("\nYour background: {}", exp))
        .unwrap_or_default();
    let examples = if config.include_questions {
        PROFESSIONAL_EXAMPLES_WITH_QUESTIONS
    } else {
        PROFESSIONAL_EXAMPLES
    };

    format!(
        r#"Write a LinkedIn comment that sounds exactly like a real person having a natural conversation.

Post: "{content}"{profile_context}

Your task: Write like the successful comments below (these got 50+ impressions and one got 4K):

{examples}

MATCH THIS STYLE:
- Start with natural phrases like "Love this", "Great point", "So true"
- Use simple words everyone understands
- Sound genuinely interested and thoughtful
- Be conversational, like talking to a colleague
- {question_instruction}
- Write complete, flowing sentences
- Show personal insight or experience
{tone_cue}
{length_phrase}

AVOID:
- Starting with "This shows People really.."
- Incomplete sentences
- Business jargon or complex words
- AI-sounding phrases
- Multiple options or numbered lists

Write ONE natural comment that sounds human and gets people to engage:"#,
        content = post.content,
        profile_context = profile_context,
        examples = examples,
        question_instruction = question_instruction,
        tone_cue = professional_tone_cue(config.tone),
        length_phrase = config.comment_length.phrase(),
    )
}

/// Prompt for `CommentStyle::Casual`.
pub fn human_like_prompt(
    post: &SourcePost,
    config: &GenerationConfig,
    profile: Option<&UserProfile>,
) -> String {
    let question_guidance = if config.include_questions {
        "• End with one natural question that invites replies"
    } else {
        "• Do not include questions. End with a clear statement or observation"
    };

    let background = match (profile, experience_of(profile)) {
        (Some(p), Some(exp)) => {
            let skills = p.skills_summary();
            let skills = if skills.is_empty() { "General business".to_string() } else { skills };
            let industry = if config.industry.is_empty() {
                "Professional services"
            } else {
                config.industry.as_str()
            };
            format!(
                "\n\nYOUR PROFESSIONAL BACKGROUND:\n• Experience: {}\n• Skills: {}\n• Industry: {}",
                exp, skills, industry
            )
        }
        _ => String::new(),
    };

    let examples = if config.include_questions {
        HUMAN_EXAMPLES_WITH_QUESTIONS
    } else {
        HUMAN_EXAMPLES
    };

    format!(
        r#"You are writing a natural, conversational LinkedIn comment. Write like you're chatting with a colleague about something interesting you saw.

Post Content: "{content}"{background}

WRITE NATURALLY:
• Use everyday words that anyone understands
• Sound like you're talking, not writing a report
• Be genuine and interested in the topic
• NO business jargon or complicated words
• NO multiple options or numbered points
{question_guidance}

{tone_cue}

YOUR NATURAL STYLE (like your successful comments):
{examples}

KEEP IT SIMPLE:
• Use "help" not "assist"
• Use "show" not "demonstrate"
• Use "use" not "utilize"
• Use "start" not "commence"
• Use "make" not "create"
• Use "get" not "obtain"

AVOID SOUNDING LIKE AI:
• NO multiple numbered options
• NO corporate buzzwords
• NO overly formal language
• NO phrases like "arms race" or "hyper-specialization"

TONE: {tone} and friendly
LENGTH: Around {target} characters

Write ONE simple, natural comment that shows you're genuinely interested in the topic."#,
        content = post.content,
        background = background,
        question_guidance = question_guidance,
        tone_cue = casual_tone_cue(config.tone),
        examples = examples,
        tone = config.tone.as_str(),
        target = config.comment_length.target_chars(),
    )
}

/// Pick the prompt family for the configured style.
pub fn build_prompt(
    post: &SourcePost,
    config: &GenerationConfig,
    profile: Option<&UserProfile>,
) -> String {
    match config.comment_style {
        CommentStyle::Professional => professional_prompt(post, config, profile),
        CommentStyle::Casual => human_like_prompt(post, config, profile),
    }
}
