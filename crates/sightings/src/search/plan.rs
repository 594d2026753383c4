//! Query planning

use crate::config::ScanConfig;

/// Which disambiguating term a query adds to the sender filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// `from:` only; the broadest query
    Sender,
    /// Sender plus the domain keyword
    SenderAndDomain,
    /// Sender plus the quoted notification phrase
    SenderAndPhrase,
    /// Sender plus the required field keyword
    SenderAndField,
}

/// One Gmail search query in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub kind: QueryKind,
    pub text: String,
}

impl SearchQuery {
    /// Whether results from this query make the narrower ones unnecessary
    pub fn is_broadest(&self) -> bool {
        self.kind == QueryKind::Sender
    }
}

/// Build the ordered query list, broadest first
pub fn plan_queries(config: &ScanConfig) -> Vec<SearchQuery> {
    let from = format!("from:{}", config.sender);

    vec![
        SearchQuery {
            kind: QueryKind::Sender,
            text: from.clone(),
        },
        SearchQuery {
            kind: QueryKind::SenderAndDomain,
            text: format!("{} {}", from, config.domain_keyword),
        },
        SearchQuery {
            kind: QueryKind::SenderAndPhrase,
            text: format!("{} \"{}\"", from, config.notification_phrase),
        },
        SearchQuery {
            kind: QueryKind::SenderAndField,
            text: format!("{} {}", from, config.vin_keyword),
        },
    ]
}
