//! Superclass-scoped perform
//!
//! `perform:inSuperclass:` resolves the selector in an explicitly supplied
//! class instead of the receiver's own, so there is no discriminant worth
//! caching: the site is single-shot and always takes the indirect path.

use crate::error::Result;
use crate::intern::SymbolId;
use crate::runtime::class::ClassId;
use crate::runtime::universe::Universe;
use crate::runtime::value::Value;

/// Resolve `selector` in `class` and invoke it on `receiver` indirectly
pub fn perform_in_superclass(
    universe: &Universe,
    receiver: &Value,
    selector: SymbolId,
    class: ClassId,
) -> Result<Value> {
    let invokable = universe
        .lookup_invokable(class, selector)
        .ok_or_else(|| universe.does_not_understand(class, selector))?;
    universe.invoke(&invokable, &[receiver.clone()])
}
