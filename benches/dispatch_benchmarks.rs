//! Performance benchmarks for the dispatch engine
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the three regimes a call site passes through:
//! - Monomorphic hit (one entry, guard matches on the first test)
//! - Polymorphic scan (several entries, linear guard walk)
//! - Megamorphic fallback (generic path, full lookup every call)

use argent::runtime::class::Class;
use argent::{intern, FieldDispatch, HasGlobal, SymbolDispatch, Universe, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::rc::Rc;

fn universe_with_shapes(n: usize) -> (Universe, Vec<argent::ClassId>) {
    let mut universe = Universe::new();
    let object_class = universe.builtins().object_class;
    let tag = intern::intern("tag");

    let mut classes = Vec::with_capacity(n);
    for i in 0..n {
        let id = universe.add_class(Class::new(&format!("Shape{}", i), Some(object_class), 2));
        let answer = i as i64;
        universe
            .class_mut(id)
            .install_method(tag, Rc::new(move |_, _| Ok(Value::Integer(answer))));
        classes.push(id);
    }
    (universe, classes)
}

/// Benchmark: monomorphic send hit
fn bench_monomorphic_send(c: &mut Criterion) {
    let (universe, classes) = universe_with_shapes(1);
    let tag = intern::intern("tag");
    let receiver = Value::Instance(universe.new_instance(classes[0]));

    c.bench_function("send_monomorphic_hit", |b| {
        let mut site = SymbolDispatch::new();
        site.dispatch(&universe, &receiver, tag, None).unwrap();
        b.iter(|| {
            site.dispatch(&universe, black_box(&receiver), tag, None)
                .unwrap()
        })
    });
}

/// Benchmark: polymorphic field read scanning a partially filled chain
fn bench_polymorphic_field_read(c: &mut Criterion) {
    let (universe, classes) = universe_with_shapes(4);
    let objects: Vec<_> = classes
        .iter()
        .map(|&class| universe.new_instance(class))
        .collect();

    c.bench_function("field_read_polymorphic_scan", |b| {
        let mut site = FieldDispatch::new();
        for obj in &objects {
            site.read(&universe, obj, 0).unwrap();
        }
        b.iter(|| {
            for obj in &objects {
                site.read(&universe, black_box(obj), 0).unwrap();
            }
        })
    });
}

/// Benchmark: megamorphic field read through the generic fallback
fn bench_megamorphic_field_read(c: &mut Criterion) {
    let (universe, classes) = universe_with_shapes(16);
    let objects: Vec<_> = classes
        .iter()
        .map(|&class| universe.new_instance(class))
        .collect();

    c.bench_function("field_read_megamorphic_fallback", |b| {
        let mut site = FieldDispatch::new();
        for obj in &objects {
            site.read(&universe, obj, 0).unwrap();
        }
        assert_eq!(site.read_chain_length(), 0);
        b.iter(|| {
            for obj in &objects {
                site.read(&universe, black_box(obj), 0).unwrap();
            }
        })
    });
}

/// Benchmark: cached has-global check vs table recomputation
fn bench_has_global(c: &mut Criterion) {
    let universe = Universe::new();
    let name = intern::intern("Object");

    c.bench_function("has_global_cached", |b| {
        let mut site = HasGlobal::new();
        site.check(&universe, name);
        b.iter(|| site.check(&universe, black_box(name)))
    });

    c.bench_function("has_global_generic", |b| {
        b.iter(|| HasGlobal::check_generic(&universe, black_box(name)))
    });
}

criterion_group!(
    benches,
    bench_monomorphic_send,
    bench_polymorphic_field_read,
    bench_megamorphic_field_read,
    bench_has_global
);
criterion_main!(benches);
