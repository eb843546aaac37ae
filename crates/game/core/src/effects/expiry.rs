//! Duration bookkeeping: decrement and cleanup.

use crate::env::EffectOracle;

use super::instance::EffectInstance;

/// Subtracts one turn from every finite instance with duration `> 0`.
///
/// Instances of infinite definitions are never touched, whatever their stored
/// duration. Instances whose definition is unknown are treated as finite so
/// stale data eventually drains away.
pub fn decrement_durations(catalog: &dyn EffectOracle, container: &mut [EffectInstance]) {
    decrement_where(catalog, container, |_| true);
}

/// [`decrement_durations`] restricted to instances matching `select`.
pub fn decrement_where(
    catalog: &dyn EffectOracle,
    container: &mut [EffectInstance],
    select: impl Fn(&EffectInstance) -> bool,
) {
    for instance in container.iter_mut().filter(|i| select(i)) {
        if !is_infinite(catalog, instance) && instance.remaining > 0 {
            instance.remaining -= 1;
        }
    }
}

/// Removes every expired instance and returns the removed ones in list order.
///
/// An instance is expired when its remaining duration is `<= 0` and its
/// definition is not infinite.
pub fn cleanup_expired(
    catalog: &dyn EffectOracle,
    container: &mut Vec<EffectInstance>,
) -> Vec<EffectInstance> {
    cleanup_where(catalog, container, |_| true)
}

/// [`cleanup_expired`] restricted to instances matching `select`.
pub fn cleanup_where(
    catalog: &dyn EffectOracle,
    container: &mut Vec<EffectInstance>,
    select: impl Fn(&EffectInstance) -> bool,
) -> Vec<EffectInstance> {
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(container.len());
    for instance in container.drain(..) {
        if select(&instance) && !is_infinite(catalog, &instance) && instance.remaining <= 0 {
            removed.push(instance);
        } else {
            kept.push(instance);
        }
    }
    *container = kept;
    removed
}

fn is_infinite(catalog: &dyn EffectOracle, instance: &EffectInstance) -> bool {
    catalog
        .definition(&instance.def_id)
        .is_some_and(|def| def.is_infinite())
}
