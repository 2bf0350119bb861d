use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The emotions the wellness helper knows how to respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Surprise,
    Neutral,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Love,
        Emotion::Surprise,
        Emotion::Neutral,
        Emotion::Disgust,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Love => "love",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Disgust => "disgust",
        }
    }

    /// Labels outside the catalog fall back to Neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "joy" => Emotion::Joy,
            "sadness" => Emotion::Sadness,
            "anger" => Emotion::Anger,
            "fear" => Emotion::Fear,
            "love" => Emotion::Love,
            "surprise" => Emotion::Surprise,
            "neutral" => Emotion::Neutral,
            "disgust" => Emotion::Disgust,
            _ => Emotion::Neutral,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Joy => "😊",
            Emotion::Sadness => "😢",
            Emotion::Anger => "😠",
            Emotion::Fear => "😨",
            Emotion::Love => "❤️",
            Emotion::Surprise => "😲",
            Emotion::Neutral => "😐",
            Emotion::Disgust => "🤢",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Joy => "#10b981",
            Emotion::Sadness => "#60a5fa",
            Emotion::Anger => "#ef4444",
            Emotion::Fear => "#a78bfa",
            Emotion::Love => "#f87171",
            Emotion::Surprise => "#fbbf24",
            Emotion::Neutral => "#9ca3af",
            Emotion::Disgust => "#4ade80",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            Emotion::Joy => &[
                "Wonderful! Share your joy with someone else today.",
                "Take a moment to appreciate what's going well in your life.",
                "Consider journaling about this positive feeling to reflect on later.",
                "Use this positive energy to tackle a task you've been putting off.",
                "Good emotions are worth celebrating - maybe treat yourself today!",
            ],
            Emotion::Sadness => &[
                "It's okay to feel sad. Give yourself permission to experience your emotions.",
                "Try deep breathing for 5 minutes - inhale for 4 seconds, hold for 2, exhale for 6.",
                "Consider reaching out to a friend or family member you trust.",
                "A short walk outside might help shift your perspective.",
                "Hydrate and make sure you've eaten something nourishing today.",
            ],
            Emotion::Anger => &[
                "When angry, try counting slowly to 10 before responding.",
                "Physical activity can help release tension - even a quick stretch.",
                "Writing down what's bothering you might help organize your thoughts.",
                "Consider if your anger is proportional to the situation.",
                "Deep breathing can help calm your nervous system when feeling angry.",
            ],
            Emotion::Fear => &[
                "Remember that you've overcome difficult situations before.",
                "Try grounding yourself: name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
                "Break what's scaring you into smaller, manageable steps.",
                "Uncertainty is part of life - focus on what you can control.",
                "Consider writing down your fears to examine them more objectively.",
            ],
            Emotion::Love => &[
                "Express your appreciation to those you care about.",
                "Love includes self-care too - do something kind for yourself today.",
                "Consider writing a gratitude list for the relationships in your life.",
                "Share your positive feelings with others around you.",
                "Use this warm feeling to reach out to someone you haven't talked to in a while.",
            ],
            Emotion::Surprise => &[
                "Take a moment to process unexpected events before reacting.",
                "Surprises can open up new perspectives - what might you learn from this?",
                "Share your experience with someone else to help process it.",
                "Journal about this unexpected moment to reflect on later.",
                "Remember that adaptability is a strength you can develop.",
            ],
            Emotion::Neutral => &[
                "Sometimes a neutral state is a good time for reflection.",
                "Consider setting an intention for how you'd like to feel today.",
                "This might be a good time to try something new that interests you.",
                "Check in with your body - do you need water, rest, or movement?",
                "Use this balanced state to plan or organize something important to you.",
            ],
            Emotion::Disgust => &[
                "Try to identify exactly what's causing this feeling.",
                "Sometimes stepping away from a situation can help provide clarity.",
                "Consider if there's something constructive you can do about what's bothering you.",
                "Your feelings are valid, even if others don't understand them.",
                "A few minutes of fresh air might help clear your mind.",
            ],
        }
    }
}

pub fn random_tip(emotion: Emotion) -> &'static str {
    let mut rng = rand::thread_rng();
    emotion
        .tips()
        .choose(&mut rng)
        .expect("every emotion carries at least one tip")
}
