//! # Change Detector
//!
//! Decides whether a combination actually did anything. The prior-work
//! counter and stack size are not part of the comparison: bumping the
//! counter alone is not a change.

use crate::item::ItemSnapshot;

/// Returns true if `after` differs from `before` in enchantments, damage
/// (damageable kinds only) or display name.
#[must_use]
pub fn changed(before: &ItemSnapshot, after: &ItemSnapshot) -> bool {
    if before.enchantments != after.enchantments {
        return true;
    }
    let damageable = before.kind.is_damageable() && after.kind.is_damageable();
    if damageable && before.damage != after.damage {
        return true;
    }
    before.display_name != after.display_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchantment::EnchantmentId;
    use crate::kind::{ItemKind, ToolShape, ToolTier};

    fn sword() -> ItemSnapshot {
        ItemSnapshot::new(ItemKind::Tool(ToolTier::Iron, ToolShape::Sword)).with_damage(50)
    }

    #[test]
    fn test_identical_is_unchanged() {
        assert!(!changed(&sword(), &sword()));
    }

    #[test]
    fn test_repair_uses_alone_is_unchanged() {
        assert!(!changed(&sword(), &sword().with_repair_uses(3)));
    }

    #[test]
    fn test_each_field_counts() {
        assert!(changed(&sword(), &sword().with_damage(10)));
        assert!(changed(&sword(), &sword().named("Edge")));
        assert!(changed(
            &sword(),
            &sword().with_enchantment(EnchantmentId::UNBREAKING, 1)
        ));
    }

    #[test]
    fn test_damage_ignored_for_non_damageable() {
        let book = ItemSnapshot::new(ItemKind::EnchantedBook);
        let mut other = book.clone();
        other.damage = 3;
        assert!(!changed(&book, &other));
    }
}
