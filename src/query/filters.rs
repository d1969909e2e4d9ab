use tracing::warn;

use super::models::{Entity, EntityType, SearchFilters};


/// Folds entities into retrieval filters. A pure function of `entities`.
///
/// Price and category (and brand, into `vendor`) overwrite, so the last one
/// wins; the list fields append and keep duplicates.
pub fn entities_to_filters(entities: &[Entity]) -> SearchFilters {
    let mut filters = SearchFilters::default();

    for entity in entities {
        match entity.entity_type {
            EntityType::Price => match entity.as_price() {
                Some(range) => filters.price_range = Some(*range),
                None => mismatched(entity),
            },
            EntityType::Color => append(&mut filters.colors, entity),
            EntityType::Material => append(&mut filters.materials, entity),
            EntityType::Size => append(&mut filters.sizes, entity),
            EntityType::Occasion => append(&mut filters.tags, entity),
            EntityType::Category => overwrite(&mut filters.product_type, entity),
            EntityType::Brand => overwrite(&mut filters.vendor, entity),
        }
    }

    filters
}

fn append(field: &mut Option<Vec<String>>, entity: &Entity) {
    match entity.as_text() {
        Some(value) => field.get_or_insert_with(Vec::new).push(value.to_string()),
        None => mismatched(entity),
    }
}

fn overwrite(field: &mut Option<String>, entity: &Entity) {
    match entity.as_text() {
        Some(value) => *field = Some(value.to_string()),
        None => mismatched(entity),
    }
}

fn mismatched(entity: &Entity) {
    if cfg!(debug_assertions) {
        panic!("entity value does not fit its type: {:?}", entity);
    }
    warn!("Skipping entity whose value does not fit its type: {:?}", entity);
}
