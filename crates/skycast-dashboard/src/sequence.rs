//! Request sequencing.
//!
//! Every fetch gets a ticket when it is issued. A completion is applied only
//! if its ticket is the newest one issued for its category, so the last
//! request wins no matter which response arrives last.

/// Independent streams of requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestCategory {
    Current,
    Forecast,
}

/// Issued with each request and echoed back with its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub category: RequestCategory,
    pub seq: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    current: u64,
    forecast: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `category`, superseding all earlier ones.
    pub fn issue(&mut self, category: RequestCategory) -> Ticket {
        let counter = self.counter_mut(category);
        *counter += 1;
        Ticket {
            category,
            seq: *counter,
        }
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        let latest = match ticket.category {
            RequestCategory::Current => self.current,
            RequestCategory::Forecast => self.forecast,
        };
        ticket.seq == latest
    }

    fn counter_mut(&mut self, category: RequestCategory) -> &mut u64 {
        match category {
            RequestCategory::Current => &mut self.current,
            RequestCategory::Forecast => &mut self.forecast,
        }
    }
}
