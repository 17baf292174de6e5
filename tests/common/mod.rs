//! Shared fixtures for the dispatch integration tests

#![allow(dead_code)]

use argent::runtime::class::Class;
use argent::{intern, ClassId, Instance, Universe, Value};
use std::rc::Rc;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a tracing subscriber once per test binary so specialization
/// and megamorphic-collapse events show up under `RUST_LOG=argent=trace`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a universe with `n` user classes, each with a two-field layout
/// and a `tag` method answering the class's position.
pub fn universe_with_shapes(n: usize) -> (Universe, Vec<ClassId>) {
    init_tracing();
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

/// Allocate an instance of `class` with its first field set to `seed`
pub fn seeded_instance(universe: &Universe, class: ClassId, seed: i64) -> Rc<Instance> {
    let obj = universe.new_instance(class);
    obj.set_field(0, Value::Integer(seed));
    obj
}
