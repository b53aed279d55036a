use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

/// Scenarios sharing one setup fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioGroup {
    CreateItem,
    GetItem,
    SellerItems,
    Statistic,
    DeleteItem,
}

impl ScenarioGroup {
    pub const ALL: [ScenarioGroup; 5] = [
        ScenarioGroup::CreateItem,
        ScenarioGroup::GetItem,
        ScenarioGroup::SellerItems,
        ScenarioGroup::Statistic,
        ScenarioGroup::DeleteItem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioGroup::CreateItem => "create-item",
            ScenarioGroup::GetItem => "get-item",
            ScenarioGroup::SellerItems => "seller-items",
            ScenarioGroup::Statistic => "statistic",
            ScenarioGroup::DeleteItem => "delete-item",
        }
    }
}

impl Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioGroup {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|g| g.name()).collect();
                format!("Unknown scenario group `{raw}` (expected one of: {})", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    CreateValid,
    CreateMinimal,
    CreateHighPrice,
    CreateMissingName,
    CreateMissingPrice,
    CreateNegativePrice,
    CreateEmptyName,
    CreateInvalidJson,
    CreateDuplicates,
    GetExisting,
    GetNonexistent,
    GetEmptyId,
    GetInvalidFormat,
    SellerMultiple,
    SellerWithoutItems,
    SellerNonexistent,
    SellerNegativeId,
    SellerInvalidId,
    StatisticExisting,
    StatisticNonexistent,
    StatisticV2,
    StatisticEmptyId,
    DeleteExisting,
    DeleteNonexistent,
    DeleteInvalidId,
}

impl Scenario {
    /// Execution order of a full run.
    pub const ALL: [Scenario; 25] = [
        Scenario::CreateValid,
        Scenario::CreateMinimal,
        Scenario::CreateHighPrice,
        Scenario::CreateMissingName,
        Scenario::CreateMissingPrice,
        Scenario::CreateNegativePrice,
        Scenario::CreateEmptyName,
        Scenario::CreateInvalidJson,
        Scenario::CreateDuplicates,
        Scenario::GetExisting,
        Scenario::GetNonexistent,
        Scenario::GetEmptyId,
        Scenario::GetInvalidFormat,
        Scenario::SellerMultiple,
        Scenario::SellerWithoutItems,
        Scenario::SellerNonexistent,
        Scenario::SellerNegativeId,
        Scenario::SellerInvalidId,
        Scenario::StatisticExisting,
        Scenario::StatisticNonexistent,
        Scenario::StatisticV2,
        Scenario::StatisticEmptyId,
        Scenario::DeleteExisting,
        Scenario::DeleteNonexistent,
        Scenario::DeleteInvalidId,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Scenario::CreateValid => "TC-001",
            Scenario::CreateMinimal => "TC-002",
            Scenario::CreateHighPrice => "TC-003",
            Scenario::CreateMissingName => "TC-004",
            Scenario::CreateMissingPrice => "TC-005",
            Scenario::CreateNegativePrice => "TC-006",
            Scenario::CreateEmptyName => "TC-008",
            Scenario::CreateInvalidJson => "TC-009",
            Scenario::CreateDuplicates => "TC-010",
            Scenario::GetExisting => "TC-201",
            Scenario::GetNonexistent => "TC-202",
            Scenario::GetEmptyId => "TC-203",
            Scenario::GetInvalidFormat => "TC-204",
            Scenario::SellerMultiple => "TC-301",
            Scenario::SellerWithoutItems => "TC-302",
            Scenario::SellerNonexistent => "TC-303",
            Scenario::SellerNegativeId => "TC-304",
            Scenario::SellerInvalidId => "TC-305",
            Scenario::StatisticExisting => "TC-401",
            Scenario::StatisticNonexistent => "TC-402",
            Scenario::StatisticV2 => "TC-403",
            Scenario::StatisticEmptyId => "TC-404",
            Scenario::DeleteExisting => "TC-501",
            Scenario::DeleteNonexistent => "TC-502",
            Scenario::DeleteInvalidId => "TC-503",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::CreateValid => "Create item with correct data",
            Scenario::CreateMinimal => "Create item with minimal allowed data",
            Scenario::CreateHighPrice => "Create item with high price",
            Scenario::CreateMissingName => "Reject item without name",
            Scenario::CreateMissingPrice => "Reject item without price",
            Scenario::CreateNegativePrice => "Handle item with negative price",
            Scenario::CreateEmptyName => "Reject item with empty name",
            Scenario::CreateInvalidJson => "Reject malformed JSON body",
            Scenario::CreateDuplicates => "Identical items get distinct ids",
            Scenario::GetExisting => "Get existing item by id",
            Scenario::GetNonexistent => "Get item with unknown id",
            Scenario::GetEmptyId => "Get item with empty id",
            Scenario::GetInvalidFormat => "Get item with malformed id",
            Scenario::SellerMultiple => "List items of seller with several items",
            Scenario::SellerWithoutItems => "List items of seller without items",
            Scenario::SellerNonexistent => "List items of unknown seller",
            Scenario::SellerNegativeId => "List items with negative seller id",
            Scenario::SellerInvalidId => "List items with non-numeric seller id",
            Scenario::StatisticExisting => "Get statistics of existing item",
            Scenario::StatisticNonexistent => "Get statistics of unknown item",
            Scenario::StatisticV2 => "Get statistics through API v2",
            Scenario::StatisticEmptyId => "Get statistics with empty id",
            Scenario::DeleteExisting => "Delete existing item",
            Scenario::DeleteNonexistent => "Delete unknown item",
            Scenario::DeleteInvalidId => "Delete with malformed id",
        }
    }

    pub fn group(self) -> ScenarioGroup {
        match self.case() {
            Case::CreateItem(_) => ScenarioGroup::CreateItem,
            Case::GetItem(_) => ScenarioGroup::GetItem,
            Case::SellerItems(_) => ScenarioGroup::SellerItems,
            Case::Statistic(_) => ScenarioGroup::Statistic,
            Case::DeleteItem(_) => ScenarioGroup::DeleteItem,
        }
    }

    /// The scenario as a case of its group, which picks the setup it runs on.
    pub(crate) fn case(self) -> Case {
        match self {
            Scenario::CreateValid => Case::CreateItem(CreateCase::Valid),
            Scenario::CreateMinimal => Case::CreateItem(CreateCase::Minimal),
            Scenario::CreateHighPrice => Case::CreateItem(CreateCase::HighPrice),
            Scenario::CreateMissingName => Case::CreateItem(CreateCase::MissingName),
            Scenario::CreateMissingPrice => Case::CreateItem(CreateCase::MissingPrice),
            Scenario::CreateNegativePrice => Case::CreateItem(CreateCase::NegativePrice),
            Scenario::CreateEmptyName => Case::CreateItem(CreateCase::EmptyName),
            Scenario::CreateInvalidJson => Case::CreateItem(CreateCase::InvalidJson),
            Scenario::CreateDuplicates => Case::CreateItem(CreateCase::Duplicates),
            Scenario::GetExisting => Case::GetItem(GetCase::Existing),
            Scenario::GetNonexistent => Case::GetItem(GetCase::Nonexistent),
            Scenario::GetEmptyId => Case::GetItem(GetCase::EmptyId),
            Scenario::GetInvalidFormat => Case::GetItem(GetCase::InvalidFormat),
            Scenario::SellerMultiple => Case::SellerItems(SellerCase::Multiple),
            Scenario::SellerWithoutItems => Case::SellerItems(SellerCase::WithoutItems),
            Scenario::SellerNonexistent => Case::SellerItems(SellerCase::Nonexistent),
            Scenario::SellerNegativeId => Case::SellerItems(SellerCase::NegativeId),
            Scenario::SellerInvalidId => Case::SellerItems(SellerCase::InvalidId),
            Scenario::StatisticExisting => Case::Statistic(StatisticCase::Existing),
            Scenario::StatisticNonexistent => Case::Statistic(StatisticCase::Nonexistent),
            Scenario::StatisticV2 => Case::Statistic(StatisticCase::V2),
            Scenario::StatisticEmptyId => Case::Statistic(StatisticCase::EmptyId),
            Scenario::DeleteExisting => Case::DeleteItem(DeleteCase::Existing),
            Scenario::DeleteNonexistent => Case::DeleteItem(DeleteCase::Nonexistent),
            Scenario::DeleteInvalidId => Case::DeleteItem(DeleteCase::InvalidId),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Case {
    CreateItem(CreateCase),
    GetItem(GetCase),
    SellerItems(SellerCase),
    Statistic(StatisticCase),
    DeleteItem(DeleteCase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CreateCase {
    Valid,
    Minimal,
    HighPrice,
    MissingName,
    MissingPrice,
    NegativePrice,
    EmptyName,
    InvalidJson,
    Duplicates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GetCase {
    Existing,
    Nonexistent,
    EmptyId,
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SellerCase {
    Multiple,
    WithoutItems,
    Nonexistent,
    NegativeId,
    InvalidId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum StatisticCase {
    Existing,
    Nonexistent,
    V2,
    EmptyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DeleteCase {
    Existing,
    Nonexistent,
    InvalidId,
}

/// Outcome of one scenario. Skips happen when a setup could not create the
/// item a scenario depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl ScenarioOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioOutcome::Passed => "PASS",
            ScenarioOutcome::Failed(_) => "FAIL",
            ScenarioOutcome::Skipped(_) => "SKIP",
        }
    }
}

/// Selects scenarios by group and by code fragment. An empty filter selects
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    pub groups: Vec<ScenarioGroup>,
    pub code: Option<String>,
}

impl ScenarioFilter {
    pub fn matches(&self, scenario: Scenario) -> bool {
        let group_ok = self.groups.is_empty() || self.groups.contains(&scenario.group());
        let code_ok = self.code.as_deref().is_none_or(|fragment| {
            scenario
                .code()
                .to_ascii_lowercase()
                .contains(&fragment.trim().to_ascii_lowercase())
        });
        group_ok && code_ok
    }

    pub fn select(&self) -> Vec<Scenario> {
        Scenario::ALL
            .into_iter()
            .filter(|scenario| self.matches(*scenario))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<&str> = Scenario::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes.len(), Scenario::ALL.len());
    }

    #[test]
    fn every_group_has_scenarios() {
        for group in ScenarioGroup::ALL {
            assert!(Scenario::ALL.iter().any(|s| s.group() == group), "{group} is empty");
        }
    }

    #[test]
    fn every_scenario_maps_to_a_distinct_case() {
        let cases: HashSet<Case> = Scenario::ALL.iter().map(|s| s.case()).collect();
        assert_eq!(cases.len(), Scenario::ALL.len());
        assert_eq!(Scenario::StatisticV2.case(), Case::Statistic(StatisticCase::V2));
        assert_eq!(Scenario::DeleteInvalidId.group(), ScenarioGroup::DeleteItem);
    }

    #[test]
    fn group_parses_case_insensitively() {
        assert_eq!("Seller-Items".parse::<ScenarioGroup>().unwrap(), ScenarioGroup::SellerItems);
        assert!("sellers".parse::<ScenarioGroup>().is_err());
    }

    #[test]
    fn empty_filter_selects_all() {
        assert_eq!(ScenarioFilter::default().select().len(), Scenario::ALL.len());
    }

    #[test]
    fn filter_by_group_and_code() {
        let filter = ScenarioFilter {
            groups: vec![ScenarioGroup::GetItem],
            code: None,
        };
        assert_eq!(filter.select().len(), 4);

        let filter = ScenarioFilter {
            groups: vec![],
            code: Some("tc-40".into()),
        };
        assert_eq!(
            filter.select(),
            [
                Scenario::StatisticExisting,
                Scenario::StatisticNonexistent,
                Scenario::StatisticV2,
                Scenario::StatisticEmptyId,
            ]
        );
    }

    #[test]
    fn outcome_serializes_with_reason() {
        let value = serde_json::to_value(ScenarioOutcome::Skipped("Item not created".into())).unwrap();
        assert_eq!(value, serde_json::json!({"outcome": "skipped", "reason": "Item not created"}));
        let value = serde_json::to_value(ScenarioOutcome::Passed).unwrap();
        assert_eq!(value, serde_json::json!({"outcome": "passed"}));
    }
}
