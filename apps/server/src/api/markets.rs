use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::MarketsResponse};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use coinlens_market_data::{
    available_names, ChartSet, InputError, QuoteCurrency, Selection, SortKey,
};
use serde::Deserialize;

#[derive(Deserialize, Default)]
struct MarketsQuery {
    currency: Option<String>,
    /// Comma-separated asset names.
    names: Option<String>,
    /// Raw text, parsed in `into_request`.
    limit: Option<String>,
    sort: Option<String>,
}

impl MarketsQuery {
    fn into_request(self) -> ApiResult<(QuoteCurrency, Selection)> {
        let currency = match self.currency.as_deref() {
            Some(c) => c.parse()?,
            None => QuoteCurrency::default(),
        };
        let names = self.names.map(|raw| {
            raw.split(',')
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
        });
        let sort = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(s) => Some(s.parse::<SortKey>()?),
            None => None,
        };
        let limit = match self.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| InputError::InvalidLimit(raw.to_string()))?,
            None => Selection::default().limit,
        };
        let selection = Selection { names, limit, sort };
        selection.validate()?;
        Ok((currency, selection))
    }
}

async fn get_markets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> ApiResult<Json<MarketsResponse>> {
    let (currency, selection) = query.into_request()?;

    let acquisition = state.market_data.fetch(currency).await;
    let (snapshot, diagnostic) = acquisition.into_parts();
    if let Some(d) = &diagnostic {
        tracing::warn!("Serving fallback market data for {}: {}", currency, d.summary());
    }

    let table = selection.apply(&snapshot)?;
    let charts = ChartSet::from_records(&table.records);

    Ok(Json(MarketsResponse {
        quote_currency: snapshot.quote_currency,
        source: snapshot.source,
        fetched_at: snapshot.fetched_at,
        diagnostic,
        available_names: available_names(&snapshot),
        dimensions: table.dimensions,
        records: table.records,
        charts,
    }))
}

async fn list_currencies() -> Json<Vec<&'static str>> {
    Json(QuoteCurrency::ALL.iter().map(QuoteCurrency::as_str).collect())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/markets", get(get_markets))
        .route("/currencies", get(list_currencies))
}
