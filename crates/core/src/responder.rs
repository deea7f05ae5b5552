use crate::catalog::Catalog;
use crate::models::{Intent, IntentFlags, OrderCandidate, Reply, ReplyKind};
use crate::random::ChoiceSource;

const GREETING: &str =
    "Hello! Welcome to Pizza Today! How can I assist you with your pizza cravings today?";
const THANKS: &str =
    "You're welcome! If you have any other questions or need help, just let me know!";
const CUSTOMIZE: &str =
    "You can customize your pizza with different toppings. What toppings would you like?";
const TOPPINGS: &str = "We have a variety of toppings! You can choose from pepperoni, mushrooms, onions, olives, and more. What would you like on your pizza?";
const PIZZA_PROMPT: &str = "What specific pizza would you like to know about? You can ask for recommendations or available offers.";
const ORDER_PROMPT: &str =
    "Great! What pizza would you like to order? Please specify the type and size.";
const ORDER_CANCELED: &str =
    "Your order has been canceled. Let me know if you'd like to order something else!";
const HELP: &str = "I'm here to help! You can ask me about our pizzas, offers, sizes, or even customize your order.";

/// Everything a rule may look at while deciding and rendering.
pub struct ReplyContext<'a> {
    pub flags: &'a IntentFlags,
    pub order: Option<&'a OrderCandidate>,
    pub catalog: &'a Catalog,
    pub choices: &'a dyn ChoiceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Intent(Intent),
    /// Needs an order candidate in the same message as well as the intent.
    OrderWith(Intent),
    Always,
}

impl Trigger {
    fn applies(self, ctx: &ReplyContext<'_>) -> bool {
        match self {
            Self::Intent(intent) => ctx.flags.contains(intent),
            Self::OrderWith(intent) => ctx.order.is_some() && ctx.flags.contains(intent),
            Self::Always => true,
        }
    }
}

pub struct ResponseRule {
    pub kind: ReplyKind,
    pub trigger: Trigger,
    render: fn(&ReplyContext<'_>) -> String,
}

/// Evaluated top to bottom; the first rule whose trigger applies answers.
pub static RULES: &[ResponseRule] = &[
    ResponseRule {
        kind: ReplyKind::Greeting,
        trigger: Trigger::Intent(Intent::Greeting),
        render: greeting,
    },
    ResponseRule {
        kind: ReplyKind::Thanks,
        trigger: Trigger::Intent(Intent::Thank),
        render: thanks,
    },
    ResponseRule {
        kind: ReplyKind::Recommendation,
        trigger: Trigger::Intent(Intent::Recommend),
        render: recommendation,
    },
    ResponseRule {
        kind: ReplyKind::Offer,
        trigger: Trigger::Intent(Intent::Offer),
        render: offer,
    },
    ResponseRule {
        kind: ReplyKind::SizesAndPrices,
        trigger: Trigger::Intent(Intent::Size),
        render: sizes_and_prices,
    },
    ResponseRule {
        kind: ReplyKind::Customize,
        trigger: Trigger::Intent(Intent::Customize),
        render: customize,
    },
    ResponseRule {
        kind: ReplyKind::Toppings,
        trigger: Trigger::Intent(Intent::Topping),
        render: toppings,
    },
    ResponseRule {
        kind: ReplyKind::Vegetarian,
        trigger: Trigger::Intent(Intent::Vegan),
        render: vegetarian,
    },
    ResponseRule {
        kind: ReplyKind::PizzaPrompt,
        trigger: Trigger::Intent(Intent::Pizza),
        render: pizza_prompt,
    },
    ResponseRule {
        kind: ReplyKind::OrderPrompt,
        trigger: Trigger::Intent(Intent::Order),
        render: order_prompt,
    },
    ResponseRule {
        kind: ReplyKind::OrderConfirmed,
        trigger: Trigger::OrderWith(Intent::ConfirmOrder),
        render: order_confirmed,
    },
    ResponseRule {
        kind: ReplyKind::OrderCanceled,
        trigger: Trigger::OrderWith(Intent::CancelOrder),
        render: order_canceled,
    },
    ResponseRule {
        kind: ReplyKind::Help,
        trigger: Trigger::Always,
        render: help,
    },
];

pub fn generate(
    flags: &IntentFlags,
    order: Option<&OrderCandidate>,
    catalog: &Catalog,
    choices: &dyn ChoiceSource,
) -> Reply {
    let ctx = ReplyContext {
        flags,
        order,
        catalog,
        choices,
    };

    RULES
        .iter()
        .find(|rule| rule.trigger.applies(&ctx))
        .map(|rule| Reply::new(rule.kind, (rule.render)(&ctx)))
        .unwrap_or_else(|| Reply::new(ReplyKind::Help, HELP))
}

pub fn welcome(catalog: &Catalog) -> Reply {
    Reply::new(
        ReplyKind::Welcome,
        format!(
            "Welcome to Pizza Today! Here's our menu: {}",
            catalog.name_list()
        ),
    )
}

fn greeting(_: &ReplyContext<'_>) -> String {
    GREETING.to_string()
}

fn thanks(_: &ReplyContext<'_>) -> String {
    THANKS.to_string()
}

fn recommendation(ctx: &ReplyContext<'_>) -> String {
    let pick = ctx.catalog.random_offering(ctx.choices);
    format!(
        "I recommend the {} pizza! It's available in sizes: {}. Prices start at ${}.",
        pick.name,
        pick.size_list(),
        pick.starting_price()
    )
}

fn offer(ctx: &ReplyContext<'_>) -> String {
    ctx.catalog.random_offer(ctx.choices).to_string()
}

// The price range is fixed copy, not derived from the menu.
fn sizes_and_prices(ctx: &ReplyContext<'_>) -> String {
    format!(
        "We offer the following pizzas: {}. Sizes available are Small, Medium, and Large, with prices ranging from $8 to $18.",
        ctx.catalog.name_list()
    )
}

fn customize(_: &ReplyContext<'_>) -> String {
    CUSTOMIZE.to_string()
}

fn toppings(_: &ReplyContext<'_>) -> String {
    TOPPINGS.to_string()
}

fn vegetarian(ctx: &ReplyContext<'_>) -> String {
    match ctx.catalog.vegetarian_pick() {
        Some(pick) => format!(
            "We have great vegetarian options like the {} pizza. Would you like to hear more about it?",
            pick.name
        ),
        None => "We can make most of our pizzas vegetarian. Would you like to hear more?".to_string(),
    }
}

fn pizza_prompt(_: &ReplyContext<'_>) -> String {
    PIZZA_PROMPT.to_string()
}

fn order_prompt(_: &ReplyContext<'_>) -> String {
    ORDER_PROMPT.to_string()
}

fn order_confirmed(ctx: &ReplyContext<'_>) -> String {
    match ctx.order {
        Some(order) => format!(
            "Your order for {} {} pizza has been placed! Thank you!",
            order.size, order.name
        ),
        None => HELP.to_string(),
    }
}

fn order_canceled(_: &ReplyContext<'_>) -> String {
    ORDER_CANCELED.to_string()
}

fn help(_: &ReplyContext<'_>) -> String {
    HELP.to_string()
}
