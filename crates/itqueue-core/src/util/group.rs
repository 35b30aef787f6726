/// Splits `items` into maximal runs of consecutive items with equal keys.
///
/// Equal keys that are separated by a different key start a new run; this is
/// not a partition of the whole input by key.
pub fn group_adjacent<T, K, F>(items: impl Iterator<Item = T>, key_selector: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let infallible: Result<_, std::convert::Infallible> =
        try_group_adjacent(items, |item| Ok(key_selector(item)));
    match infallible {
        Ok(groups) => groups,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`group_adjacent`]. Stops at the first key selector
/// error and returns it unchanged.
pub fn try_group_adjacent<T, K, E, F>(
    items: impl Iterator<Item = T>,
    key_selector: F,
) -> Result<Vec<(K, Vec<T>)>, E>
where
    K: PartialEq,
    F: Fn(&T) -> Result<K, E>,
{
    try_group_adjacent_by(items, key_selector, |key, _, selected| key == selected, |_, key| key)
}

/// Grouping where the stored group key is built only when a group opens.
///
/// `select` runs exactly once per item. `joins` decides whether the item
/// continues the open group, given that group's key. `open` turns the
/// selection into the owned key of a new group.
pub fn try_group_adjacent_by<T, K, V, E, S, J, O>(
    items: impl Iterator<Item = T>,
    select: S,
    joins: J,
    open: O,
) -> Result<Vec<(K, Vec<T>)>, E>
where
    S: Fn(&T) -> Result<V, E>,
    J: Fn(&K, &T, &V) -> bool,
    O: Fn(&T, V) -> K,
{
    let mut result: Vec<(K, Vec<T>)> = Vec::new();
    let mut current_group: Option<(K, Vec<T>)> = None;

    for item in items {
        let selected = select(&item)?;

        match &mut current_group {
            Some((current_key, group)) if joins(current_key, &item, &selected) => {
                group.push(item);
            }
            _ => {
                if let Some(finished) = current_group.take() {
                    result.push(finished);
                }
                current_group = Some((open(&item, selected), vec![item]));
            }
        }
    }

    if let Some(finished) = current_group {
        result.push(finished);
    }

    Ok(result)
}
