use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The closed set of things a message can be asking for. Several may be
/// present in one message; precedence is decided by the responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Pizza,
    Offer,
    Size,
    Recommend,
    Order,
    Customize,
    Topping,
    Vegan,
    Thank,
    ConfirmOrder,
    CancelOrder,
}

impl Intent {
    pub const COUNT: usize = 12;

    pub const ALL: [Intent; Intent::COUNT] = [
        Intent::Greeting,
        Intent::Pizza,
        Intent::Offer,
        Intent::Size,
        Intent::Recommend,
        Intent::Order,
        Intent::Customize,
        Intent::Topping,
        Intent::Vegan,
        Intent::Thank,
        Intent::ConfirmOrder,
        Intent::CancelOrder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Pizza => "pizza",
            Self::Offer => "offer",
            Self::Size => "size",
            Self::Recommend => "recommend",
            Self::Order => "order",
            Self::Customize => "customize",
            Self::Topping => "topping",
            Self::Vegan => "vegan",
            Self::Thank => "thank",
            Self::ConfirmOrder => "confirm_order",
            Self::CancelOrder => "cancel_order",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-message intent flags. Built fresh for every message and dropped with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentFlags {
    hits: [bool; Intent::COUNT],
}

impl IntentFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.set(intent);
        self
    }

    pub fn set(&mut self, intent: Intent) {
        self.hits[intent.index()] = true;
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.hits[intent.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.hits.iter().any(|hit| *hit)
    }

    pub fn active(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL
            .into_iter()
            .filter(move |intent| self.contains(*intent))
    }
}

impl Serialize for IntentFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.active())
    }
}

/// A pizza and size picked out of a single message. Never outlives the
/// request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCandidate {
    pub name: String,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Welcome,
    PizzaDetails,
    Greeting,
    Thanks,
    Recommendation,
    Offer,
    SizesAndPrices,
    Customize,
    Toppings,
    Vegetarian,
    PizzaPrompt,
    OrderPrompt,
    OrderConfirmed,
    OrderCanceled,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    pub fn new(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatInput {
    pub text: String,
}

impl ChatInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: Reply,
    pub intents: IntentFlags,
    pub order: Option<OrderCandidate>,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        &self.reply.text
    }

    pub fn kind(&self) -> ReplyKind {
        self.reply.kind
    }
}
