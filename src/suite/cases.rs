//! Scenario bodies and the per-group setup fixtures they run on.

use tracing::debug;

use crate::api::{AdsApi, ApiVersion, NewItem, Statistics};
use crate::error::ClientError;
use crate::extract::{ResourceId, extract_id};
use crate::fixtures::FixtureRegistry;
use crate::http::ApiResponse;

use super::check::{
    CheckFailure, ensure, expect_created_id, expect_json, expect_list, expect_list_or_document,
    expect_status, mentions_id,
};
use super::scenario::{
    Case, CreateCase, DeleteCase, GetCase, Scenario, ScenarioOutcome, SellerCase, StatisticCase,
};

const DELETE_SUCCESS: [u16; 3] = [200, 201, 204];

/// State a scenario runs against: the API, the session's fixture registry
/// and the seller id every payload is offset from.
pub struct Session<'a, A: ?Sized> {
    pub api: &'a A,
    pub registry: &'a mut FixtureRegistry,
    pub seller_base: i64,
}

impl<A: AdsApi + ?Sized> Session<'_, A> {
    fn seller(&self, offset: i64) -> i64 {
        self.seller_base + offset
    }

    /// Create an item for a setup fixture. `None` when the service did not
    /// answer 200 with an identifier.
    async fn create_fixture(&mut self, item: &NewItem, track: bool) -> Option<ResourceId> {
        let response = match self.api.create_item(item).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "fixture creation failed");
                return None;
            }
        };
        if response.status != 200 {
            debug!(status = response.status, "fixture creation rejected");
            return None;
        }
        let id = response.json().as_ref().and_then(extract_id)?;
        if track {
            self.registry.record(id.clone());
        }
        Some(id)
    }

    /// Record the item of a 200 creation response, if one can be extracted.
    /// Used where the service may accept a request that the scenario
    /// expects to be rejected.
    fn track_created(&mut self, response: &ApiResponse) {
        if response.status != 200 {
            return;
        }
        if let Some(id) = response.json().as_ref().and_then(extract_id) {
            debug!(%id, "recording unexpectedly created item");
            self.registry.record(id);
        }
    }
}

enum Abort {
    Failed(CheckFailure),
    Skipped(&'static str),
}

impl From<CheckFailure> for Abort {
    fn from(failure: CheckFailure) -> Self {
        Abort::Failed(failure)
    }
}

impl From<ClientError> for Abort {
    fn from(err: ClientError) -> Self {
        Abort::Failed(err.into())
    }
}

type CaseResult = Result<(), Abort>;

fn required<T>(fixture: Option<T>, reason: &'static str) -> Result<T, Abort> {
    fixture.ok_or(Abort::Skipped(reason))
}

/// Run one scenario, including its group's setup.
pub async fn execute<A>(scenario: Scenario, session: &mut Session<'_, A>) -> ScenarioOutcome
where
    A: AdsApi + ?Sized,
{
    let result = match scenario.case() {
        Case::CreateItem(case) => create_item(case, session).await,
        Case::GetItem(case) => {
            let item = NewItem::new(session.seller(100), "Test Item for Get", 15000)
                .with_statistics(Statistics::new(3, 50, 2));
            let id = session.create_fixture(&item, true).await;
            get_item(case, session.api, id).await
        }
        Case::SellerItems(case) => {
            let seller = session.seller(200);
            let mut ids = Vec::new();
            for i in 0..2 {
                let item = NewItem::new(seller, format!("Seller Item {}", i + 1), 1000 * (i + 1))
                    .with_statistics(Statistics::new(i, 10 * i, i));
                if let Some(id) = session.create_fixture(&item, true).await {
                    ids.push(id);
                }
            }
            seller_items(case, session, seller, &ids).await
        }
        Case::Statistic(case) => {
            let item = NewItem::new(session.seller(300), "Item with Statistics", 25000)
                .with_statistics(Statistics::new(42, 1000, 15));
            let id = session.create_fixture(&item, true).await;
            statistic(case, session.api, id).await
        }
        Case::DeleteItem(case) => {
            let mut ids = Vec::new();
            for i in 0..2 {
                let item = NewItem::new(
                    session.seller(400 + i),
                    format!("Item to Delete {}", i + 1),
                    10000 + i * 1000,
                );
                if let Some(id) = session.create_fixture(&item, false).await {
                    ids.push(id);
                }
            }
            let result = delete_item(case, session.api, &mut ids).await;
            for id in ids {
                session.registry.record(id);
            }
            result
        }
    };

    match result {
        Ok(()) => ScenarioOutcome::Passed,
        Err(Abort::Failed(failure)) => ScenarioOutcome::Failed(failure.message),
        Err(Abort::Skipped(reason)) => ScenarioOutcome::Skipped(reason.to_string()),
    }
}

async fn create_item<A>(case: CreateCase, session: &mut Session<'_, A>) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    let api = session.api;
    match case {
        CreateCase::Valid => {
            let item = NewItem::new(session.seller(0), "iPhone 14 Pro", 85000)
                .with_statistics(Statistics::new(5, 120, 8));
            expect_created(session, &item).await
        }
        CreateCase::Minimal => {
            let mut item = NewItem::new(session.seller(1), "Книга", 100);
            let mut response = api.create_item(&item).await?;
            if response.status == 400 {
                debug!(body = %response.body, "zero statistics rejected, sending non-zero statistics");
                item = item.with_statistics(Statistics::new(1, 1, 1));
                response = api.create_item(&item).await?;
            }
            expect_status(&response, &[200])?;
            let id = expect_created_id(&response)?;
            session.registry.record(id);
            Ok(())
        }
        CreateCase::HighPrice => {
            let item = NewItem::new(session.seller(2), "Квартира в центре", 99_999_999)
                .with_statistics(Statistics::new(100, 5000, 250));
            expect_created(session, &item).await
        }
        CreateCase::MissingName => {
            let item = NewItem::new(session.seller(3), "", 50000).without_name();
            expect_rejected(session, &item).await
        }
        CreateCase::MissingPrice => {
            let item = NewItem::new(session.seller(4), "Товар", 0).without_price();
            expect_rejected(session, &item).await
        }
        CreateCase::NegativePrice => {
            let item = NewItem::new(session.seller(5), "Товар", -1000);
            let response = api.create_item(&item).await?;
            session.track_created(&response);
            expect_status(&response, &[400, 200])?;
            Ok(())
        }
        CreateCase::EmptyName => {
            let item = NewItem::new(session.seller(6), "", 1000);
            expect_rejected(session, &item).await
        }
        CreateCase::InvalidJson => {
            let response = api.create_item_raw("{invalid json}").await?;
            session.track_created(&response);
            expect_status(&response, &[400])?;
            Ok(())
        }
        CreateCase::Duplicates => {
            let item = NewItem::new(session.seller(7), "Дублирующийся товар", 5000)
                .with_statistics(Statistics::new(10, 100, 5));
            let first = api.create_item(&item).await?;
            let second = api.create_item(&item).await?;
            expect_status(&first, &[200])?;
            expect_status(&second, &[200])?;

            let first_id = expect_created_id(&first)?;
            session.registry.record(first_id.clone());
            let second_id = expect_created_id(&second)?;
            if second_id != first_id {
                session.registry.record(second_id.clone());
            }
            ensure(first_id != second_id, || {
                format!("IDs should be unique, both were {first_id}")
            })?;
            Ok(())
        }
    }
}

async fn expect_created<A>(session: &mut Session<'_, A>, item: &NewItem) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    let response = session.api.create_item(item).await?;
    expect_status(&response, &[200])?;
    let id = expect_created_id(&response)?;
    debug!(%id, "created item");
    session.registry.record(id);
    Ok(())
}

async fn expect_rejected<A>(session: &mut Session<'_, A>, item: &NewItem) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    let response = session.api.create_item(item).await?;
    session.track_created(&response);
    expect_status(&response, &[400])?;
    Ok(())
}

async fn get_item<A>(case: GetCase, api: &A, fixture: Option<ResourceId>) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    match case {
        GetCase::Existing => {
            let id = required(fixture, "Item not created")?;
            let response = api.get_item(id.as_str()).await?;
            expect_status(&response, &[200])?;
            let body = expect_json(&response)?;
            if let Some(items) = body.as_array() {
                ensure(!items.is_empty(), || format!("Empty list returned for item {id}"))?;
            }
            ensure(mentions_id(&body, &id), || {
                format!("Response does not refer to item {id}: {body}")
            })?;
            Ok(())
        }
        GetCase::Nonexistent => {
            let response = api.get_item("nonexistent-id-12345").await?;
            expect_status(&response, &[404, 400])?;
            Ok(())
        }
        GetCase::EmptyId => {
            let response = api.get_item("").await?;
            expect_status(&response, &[404, 400])?;
            Ok(())
        }
        GetCase::InvalidFormat => {
            let response = api.get_item("!@#$%^&*()").await?;
            expect_status(&response, &[400, 404])?;
            Ok(())
        }
    }
}

async fn seller_items<A>(
    case: SellerCase,
    session: &Session<'_, A>,
    seller: i64,
    fixtures: &[ResourceId],
) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    let api = session.api;
    match case {
        SellerCase::Multiple => {
            if fixtures.is_empty() {
                return Err(Abort::Skipped("Items not created"));
            }
            let response = api.seller_items(&seller.to_string()).await?;
            expect_status(&response, &[200])?;
            let body = expect_json(&response)?;
            let items = expect_list(&body)?;
            ensure(items.len() >= fixtures.len(), || {
                format!(
                    "Expected at least {} items for seller {seller}, got {}",
                    fixtures.len(),
                    items.len()
                )
            })?;
            Ok(())
        }
        SellerCase::WithoutItems => {
            let empty_seller = session.seller(999);
            let response = api.seller_items(&empty_seller.to_string()).await?;
            expect_status(&response, &[200])?;
            let body = expect_json(&response)?;
            expect_list(&body)?;
            Ok(())
        }
        SellerCase::Nonexistent => {
            let response = api.seller_items("999999999").await?;
            expect_status(&response, &[200, 404])?;
            Ok(())
        }
        SellerCase::NegativeId => {
            let response = api.seller_items("-1").await?;
            expect_status(&response, &[400, 404, 200])?;
            Ok(())
        }
        SellerCase::InvalidId => {
            let response = api.seller_items("abc123").await?;
            expect_status(&response, &[400, 404])?;
            Ok(())
        }
    }
}

async fn statistic<A>(case: StatisticCase, api: &A, fixture: Option<ResourceId>) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    match case {
        StatisticCase::Existing => {
            let id = required(fixture, "Item not created")?;
            let response = api.statistic(ApiVersion::V1, id.as_str()).await?;
            expect_status(&response, &[200])?;
            let body = expect_json(&response)?;
            expect_list_or_document(&body)?;
            Ok(())
        }
        StatisticCase::Nonexistent => {
            let response = api.statistic(ApiVersion::V1, "nonexistent-stat-id").await?;
            expect_status(&response, &[404, 400])?;
            Ok(())
        }
        StatisticCase::V2 => {
            let id = required(fixture, "Item not created")?;
            let response = api.statistic(ApiVersion::V2, id.as_str()).await?;
            expect_status(&response, &[200, 404])?;
            Ok(())
        }
        StatisticCase::EmptyId => {
            let response = api.statistic(ApiVersion::V1, "").await?;
            expect_status(&response, &[404, 400])?;
            Ok(())
        }
    }
}

/// Items the scenario deletes itself are removed from `fixtures`; the rest
/// are left for the session cleanup.
async fn delete_item<A>(case: DeleteCase, api: &A, fixtures: &mut Vec<ResourceId>) -> CaseResult
where
    A: AdsApi + ?Sized,
{
    match case {
        DeleteCase::Existing => {
            if fixtures.is_empty() {
                return Err(Abort::Skipped("Items not created"));
            }
            let response = api.delete_item(fixtures[0].as_str()).await?;
            if DELETE_SUCCESS.contains(&response.status) {
                fixtures.remove(0);
            }
            expect_status(&response, &DELETE_SUCCESS)?;
            Ok(())
        }
        DeleteCase::Nonexistent => {
            let response = api.delete_item("nonexistent-delete-id").await?;
            expect_status(&response, &[404, 400])?;
            Ok(())
        }
        DeleteCase::InvalidId => {
            let response = api.delete_item("!@#$%").await?;
            expect_status(&response, &[400, 404])?;
            Ok(())
        }
    }
}
