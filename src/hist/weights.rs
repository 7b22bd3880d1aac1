//! Per-row weighting schemes.

use anyhow::Result;

use crate::data::ElectionTable;
use crate::error::Error;

/// What a surviving precinct row contributes to its histogram bin. Each scheme
/// carries a fixed display label for chart legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightScheme {
    /// Each row counts its registered voters.
    RegisteredVoters,
    /// Each row counts the ballots handed out.
    BallotsGiven,
    /// Each row counts the ballots cast for the leader.
    LeaderVotes,
    /// Each row counts once; the histogram counts polling stations, not people.
    PollingStationCount,
}

impl WeightScheme {
    /// Human-readable label for the quantity being summed.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegisteredVoters => "voters registered",
            Self::BallotsGiven => "ballots given",
            Self::LeaderVotes => "ballots for leader",
            Self::PollingStationCount => "polling stations",
        }
    }

    /// Resolves the per-row weight vector against a (filtered) table.
    /// `leader` is the already-resolved leader score column; schemes that do
    /// not need it ignore it, and [`WeightScheme::LeaderVotes`] without one is
    /// an invalid parameter.
    pub(crate) fn vector(
        &self,
        table: &ElectionTable,
        leader: Option<&[f64]>,
    ) -> Result<Vec<f64>> {
        match self {
            Self::RegisteredVoters => table.voters_registered(),
            Self::BallotsGiven => table.voters_voted(),
            Self::LeaderVotes => match leader {
                Some(leader) => Ok(leader.to_vec()),
                None => Err(Error::InvalidParameter(
                    "leader-vote weighting requires a resolved leader column".into(),
                )
                .into()),
            },
            Self::PollingStationCount => Ok(vec![1.0; table.height()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WeightScheme;
    use crate::data::tests::sample_table;

    #[test]
    fn labels_are_fixed() {
        assert_eq!(WeightScheme::RegisteredVoters.label(), "voters registered");
        assert_eq!(WeightScheme::BallotsGiven.label(), "ballots given");
        assert_eq!(WeightScheme::LeaderVotes.label(), "ballots for leader");
        assert_eq!(WeightScheme::PollingStationCount.label(), "polling stations");
    }

    #[test]
    fn station_count_weights_every_row_once() {
        let table = sample_table();
        let weights = WeightScheme::PollingStationCount.vector(&table, None).unwrap();
        assert_eq!(weights, vec![1.0; table.height()]);
    }

    #[test]
    fn leader_scheme_needs_a_leader_column() {
        let table = sample_table();
        assert!(WeightScheme::LeaderVotes.vector(&table, None).is_err());

        let leader = vec![1.0; table.height()];
        let weights = WeightScheme::LeaderVotes.vector(&table, Some(&leader)).unwrap();
        assert_eq!(weights, leader);
    }
}
