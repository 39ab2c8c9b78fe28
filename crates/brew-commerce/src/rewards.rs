//! Loyalty points and reward tiers.

use serde::{Deserialize, Serialize};

use crate::CommerceError;

/// Starting balance shown to every customer.
pub const DEFAULT_POINTS: u32 = 850;

/// Points needed for the headline reward.
pub const DEFAULT_NEXT_REWARD: u32 = 1000;

/// A reward that can be bought with points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Points required to unlock.
    pub cost: u32,
}

/// Reward tiers, in display order.
pub const REWARDS: [Reward; 4] = [
    Reward {
        id: "pastry",
        title: "Free Pastry",
        description: "Any muffin, croissant, or scone.",
        cost: 400,
    },
    Reward {
        id: "extra-shot",
        title: "Extra Shot",
        description: "Add a shot to any beverage.",
        cost: 150,
    },
    Reward {
        id: "five-off",
        title: "$5 Off Order",
        description: "Apply to any order over $10.",
        cost: 600,
    },
    Reward {
        id: "artisan-drink",
        title: "Free Artisan Drink",
        description: "Any drink of your choice.",
        cost: 1000,
    },
];

/// Look up a reward by id or (case-insensitive) title.
pub fn find_reward(key: &str) -> Result<&'static Reward, CommerceError> {
    REWARDS
        .iter()
        .find(|r| r.id == key || r.title.eq_ignore_ascii_case(key))
        .ok_or_else(|| CommerceError::RewardNotFound(key.to_string()))
}

/// A customer's points balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsAccount {
    pub points: u32,
    pub next_reward: u32,
}

impl Default for RewardsAccount {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS, DEFAULT_NEXT_REWARD)
    }
}

impl RewardsAccount {
    pub fn new(points: u32, next_reward: u32) -> Self {
        Self { points, next_reward }
    }

    /// Progress towards the next reward, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.next_reward == 0 {
            return 100.0;
        }
        (f64::from(self.points) / f64::from(self.next_reward) * 100.0).min(100.0)
    }

    pub fn points_to_next(&self) -> u32 {
        self.next_reward.saturating_sub(self.points)
    }

    pub fn is_unlocked(&self, reward: &Reward) -> bool {
        self.points >= reward.cost
    }

    /// Rewards the current balance can pay for, in display order.
    pub fn unlocked(&self) -> Vec<&'static Reward> {
        REWARDS.iter().filter(|r| self.is_unlocked(r)).collect()
    }

    /// Spend points on `reward`. Returns the remaining balance.
    pub fn redeem(&mut self, reward: &Reward) -> Result<u32, CommerceError> {
        if !self.is_unlocked(reward) {
            return Err(CommerceError::InsufficientPoints {
                reward: reward.title.to_string(),
                required: reward.cost,
                available: self.points,
            });
        }
        self.points -= reward.cost;
        tracing::info!(reward = reward.id, remaining = self.points, "reward redeemed");
        Ok(self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_balance() {
        let account = RewardsAccount::default();
        assert_eq!(account.points, 850);
        assert_eq!(account.points_to_next(), 150);
        assert!((account.progress_percent() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unlocked_tiers() {
        let account = RewardsAccount::default();
        let titles: Vec<_> = account.unlocked().iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Free Pastry", "Extra Shot", "$5 Off Order"]);
        assert!(!account.is_unlocked(find_reward("artisan-drink").unwrap()));
    }

    #[test]
    fn test_redeem_deducts_points() {
        let mut account = RewardsAccount::default();
        let pastry = find_reward("Free Pastry").unwrap();
        assert_eq!(account.redeem(pastry).unwrap(), 450);
        assert_eq!(account.unlocked().len(), 2);
    }

    #[test]
    fn test_redeem_locked_reward() {
        let mut account = RewardsAccount::default();
        let drink = find_reward("artisan-drink").unwrap();
        let err = account.redeem(drink).unwrap_err();
        assert!(matches!(
            err,
            CommerceError::InsufficientPoints {
                required: 1000,
                available: 850,
                ..
            }
        ));
        assert_eq!(account.points, 850);
    }

    #[test]
    fn test_progress_caps_at_full() {
        let account = RewardsAccount::new(1500, 1000);
        assert_eq!(account.progress_percent(), 100.0);
        assert_eq!(account.points_to_next(), 0);
        assert_eq!(RewardsAccount::new(0, 0).progress_percent(), 100.0);
    }

    #[test]
    fn test_unknown_reward() {
        assert!(matches!(
            find_reward("yacht"),
            Err(CommerceError::RewardNotFound(_))
        ));
    }
}
