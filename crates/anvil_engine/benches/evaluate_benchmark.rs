//! Benchmark for anvil evaluation throughput.
//!
//! Run with: cargo bench --package anvil_engine --bench evaluate_benchmark

use anvil_engine::{
    evaluate, ArmorSlot, ArmorTier, EnchantmentId, EnchantmentRegistry, ItemKind, ItemSnapshot,
    Material, ToolShape, ToolTier,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn heavily_enchanted_sword() -> ItemSnapshot {
    ItemSnapshot::new(ItemKind::Tool(ToolTier::Netherite, ToolShape::Sword))
        .with_damage(900)
        .with_repair_uses(6)
        .with_enchantment(EnchantmentId::SHARPNESS, 4)
        .with_enchantment(EnchantmentId::LOOTING, 2)
        .with_enchantment(EnchantmentId::UNBREAKING, 3)
        .with_enchantment(EnchantmentId::FIRE_ASPECT, 1)
}

fn benchmark_same_kind_merge(c: &mut Criterion) {
    let left = heavily_enchanted_sword();
    let right = heavily_enchanted_sword()
        .with_enchantment(EnchantmentId::SMITE, 5)
        .with_enchantment(EnchantmentId::MENDING, 1);

    c.bench_function("evaluate_same_kind_merge", |b| {
        b.iter(|| black_box(evaluate(black_box(&left), Some(black_box(&right)), None)));
    });
}

fn benchmark_book_merge(c: &mut Criterion) {
    let left = heavily_enchanted_sword();
    let book = ItemSnapshot::new(ItemKind::EnchantedBook)
        .with_enchantment(EnchantmentId::SHARPNESS, 4)
        .with_enchantment(EnchantmentId::SWEEPING_EDGE, 3);

    c.bench_function("evaluate_book_merge", |b| {
        b.iter(|| black_box(evaluate(black_box(&left), Some(black_box(&book)), Some("Blade"))));
    });
}

fn benchmark_unit_repair(c: &mut Criterion) {
    let left = ItemSnapshot::new(ItemKind::Armor(ArmorTier::Diamond, ArmorSlot::Chestplate))
        .with_damage(400)
        .with_repair_uses(2);
    let diamonds = ItemSnapshot::new(ItemKind::Material(Material::Diamond)).with_amount(64);

    c.bench_function("evaluate_unit_repair", |b| {
        b.iter(|| black_box(evaluate(black_box(&left), Some(black_box(&diamonds)), None)));
    });
}

fn benchmark_registry_lookup(c: &mut Criterion) {
    let registry = EnchantmentRegistry::standard();

    c.bench_function("registry_conflict_check", |b| {
        b.iter(|| {
            black_box(registry.conflicts_with(
                black_box(&EnchantmentId::SHARPNESS),
                black_box(&EnchantmentId::BREACH),
            ))
        });
    });
}

criterion_group!(
    benches,
    benchmark_same_kind_merge,
    benchmark_book_merge,
    benchmark_unit_repair,
    benchmark_registry_lookup,
);
criterion_main!(benches);
