use std::sync::Arc;
use std::time::Instant;

use pizza_core::{
    classify, extract_order_candidate, generate, welcome, Catalog, ChatInput, ChatReply,
    ChoiceSource, IntentFlags, Reply, ReplyKind,
};
use pizza_observability::AppMetrics;
use tracing::{debug, info, instrument};

/// Answers one message at a time. Holds only the read-only menu, the random
/// source and the counters, so a single instance can serve every request.
#[derive(Clone)]
pub struct PizzaAgent {
    catalog: Arc<Catalog>,
    choices: Arc<dyn ChoiceSource>,
    metrics: Arc<AppMetrics>,
}

impl PizzaAgent {
    pub fn new(
        catalog: Arc<Catalog>,
        choices: Arc<dyn ChoiceSource>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            catalog,
            choices,
            metrics,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(skip(self, input), fields(chars = input.text.len()))]
    pub fn handle_chat(&self, input: ChatInput) -> ChatReply {
        let started = Instant::now();
        self.metrics.inc_request();

        let reply = self.respond(input.text.trim());
        self.record(&reply);
        self.metrics.observe_latency(started.elapsed());

        let intents = reply
            .intents
            .active()
            .map(|intent| intent.as_str())
            .collect::<Vec<_>>();
        info!(
            kind = ?reply.kind(),
            intents = ?intents,
            order = reply.order.is_some(),
            "chat handled"
        );

        reply
    }

    fn respond(&self, text: &str) -> ChatReply {
        if text.is_empty() {
            return shortcut(welcome(&self.catalog));
        }

        if let Some(offering) = self.catalog.find_by_name(text) {
            debug!(pizza = %offering.name, "exact menu name");
            return shortcut(Reply::new(
                ReplyKind::PizzaDetails,
                self.catalog.describe_details(offering),
            ));
        }

        let intents = classify(text);
        let order = extract_order_candidate(&self.catalog, text);
        let reply = generate(&intents, order.as_ref(), &self.catalog, self.choices.as_ref());

        ChatReply {
            reply,
            intents,
            order,
        }
    }

    fn record(&self, reply: &ChatReply) {
        match reply.kind() {
            ReplyKind::Welcome => self.metrics.inc_welcome(),
            ReplyKind::PizzaDetails => self.metrics.inc_detail_lookup(),
            ReplyKind::Help => self.metrics.inc_fallback(),
            ReplyKind::OrderConfirmed => self.metrics.inc_order_confirmed(),
            ReplyKind::OrderCanceled => self.metrics.inc_order_canceled(),
            _ => {}
        }
    }
}

fn shortcut(reply: Reply) -> ChatReply {
    ChatReply {
        reply,
        intents: IntentFlags::new(),
        order: None,
    }
}
