//! Grouping keys and contiguous runs.

use crate::types::Scoped;
use crate::util::try_group_adjacent_by;

use super::callback::KeyHook;

/// Grouping key of an element at a given level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key<S, X = ()> {
    /// Scope descriptors truncated to the level (never padded).
    pub prefix: Vec<S>,
    /// Sub-key contributed by the key hook.
    pub extra: X,
}

/// Computes the grouping key of `element` at `level`.
///
/// The prefix holds the first `min(level, scopes.len())` descriptors, so an
/// element whose scope stack is exhausted keeps a prefix shorter than the
/// level. The result depends only on the element, never on its position.
pub fn derive_key<T, E, H>(
    element: &T,
    level: usize,
    hook: &H,
) -> Result<Key<T::Scope, H::SubKey>, E>
where
    T: Scoped,
    H: KeyHook<T, E> + ?Sized,
{
    let prefix = scope_prefix(element, level).to_vec();
    let extra = <H as KeyHook<T, E>>::sub_key(hook, element, level)?;

    Ok(Key { prefix, extra })
}

fn scope_prefix<T: Scoped>(element: &T, level: usize) -> &[T::Scope] {
    let scopes = element.scopes();
    &scopes[..level.min(scopes.len())]
}

/// A maximal contiguous run of elements sharing the same key at one level.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<T: Scoped, X = ()> {
    pub key: Key<T::Scope, X>,
    pub elements: Vec<T>,
}

impl<T: Scoped, X> Run<T, X> {
    /// Scope prefix the run was grouped under.
    pub fn prefix(&self) -> &[T::Scope] {
        &self.key.prefix
    }

    /// True when the run has no scope left to discriminate at `level`.
    pub fn is_base_case(&self, level: usize) -> bool {
        level > self.key.prefix.len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Splits `elements` into runs at `level` with one left-to-right pass.
///
/// A new run starts whenever an element's key differs from the key of the
/// element right before it; equal keys separated by another key are never
/// merged. Concatenating the runs gives back `elements` unchanged.
///
/// Each run's key equals [`derive_key`] of its elements. The hook is asked
/// once per element, and prefixes are compared in place: only the first
/// element of a run has its prefix copied into the key.
pub fn scan_runs<T, E, H>(
    elements: Vec<T>,
    level: usize,
    hook: &H,
) -> Result<Vec<Run<T, H::SubKey>>, E>
where
    T: Scoped,
    H: KeyHook<T, E> + ?Sized,
{
    let groups = try_group_adjacent_by(
        elements.into_iter(),
        |element| <H as KeyHook<T, E>>::sub_key(hook, element, level),
        |key: &Key<T::Scope, H::SubKey>, element, extra| {
            key.prefix.as_slice() == scope_prefix(element, level) && &key.extra == extra
        },
        |element, extra| Key {
            prefix: scope_prefix(element, level).to_vec(),
            extra,
        },
    )?;

    Ok(groups
        .into_iter()
        .map(|(key, elements)| Run { key, elements })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::callback::{FnKeyHook, NoKeyHook};
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    #[derive(Debug, Clone, PartialEq)]
    struct Stmt {
        name: &'static str,
        scopes: Vec<&'static str>,
    }

    impl Scoped for Stmt {
        type Scope = &'static str;

        fn scopes(&self) -> &[&'static str] {
            &self.scopes
        }
    }

    fn stmt(name: &'static str, scopes: &[&'static str]) -> Stmt {
        Stmt {
            name,
            scopes: scopes.to_vec(),
        }
    }

    fn names<X>(run: &Run<Stmt, X>) -> Vec<&'static str> {
        run.elements.iter().map(|s| s.name).collect()
    }

    #[test]
    fn derive_key_truncates_without_padding() {
        let s = stmt("s", &["t", "x"]);

        let key: Key<_, ()> = derive_key::<_, Infallible, _>(&s, 1, &NoKeyHook).unwrap();
        assert_eq!(key.prefix, vec!["t"]);

        let key: Key<_, ()> = derive_key::<_, Infallible, _>(&s, 5, &NoKeyHook).unwrap();
        assert_eq!(key.prefix, vec!["t", "x"]);
    }

    #[test]
    fn derive_key_includes_hook_sub_key() {
        let hook = FnKeyHook::new(|s: &Stmt, level: usize| -> Result<String, Infallible> {
            Ok(format!("{}@{}", s.name, level))
        });

        let key = derive_key(&stmt("s", &["t"]), 2, &hook).unwrap();
        assert_eq!(key.extra, "s@2");
    }

    #[test]
    fn scan_runs_splits_on_key_change_only() {
        let elements = vec![
            stmt("a", &["i"]),
            stmt("b", &["i"]),
            stmt("c", &["j"]),
            stmt("d", &["i"]),
        ];

        let runs = scan_runs::<_, Infallible, _>(elements, 1, &NoKeyHook).unwrap();

        assert_eq!(runs.len(), 3);
        assert_eq!(names(&runs[0]), vec!["a", "b"]);
        assert_eq!(runs[0].prefix(), &["i"]);
        assert_eq!(names(&runs[1]), vec!["c"]);
        assert_eq!(names(&runs[2]), vec!["d"]);
        assert_eq!(runs[2].prefix(), &["i"]);
    }

    #[test]
    fn shorter_scope_stacks_form_their_own_run() {
        let elements = vec![stmt("a", &["i", "j"]), stmt("b", &["i"]), stmt("c", &["i", "j"])];

        let runs = scan_runs::<_, Infallible, _>(elements, 2, &NoKeyHook).unwrap();

        assert_eq!(runs.len(), 3);
        assert!(!runs[0].is_base_case(2));
        assert!(runs[1].is_base_case(2));
        assert!(!runs[2].is_base_case(2));
    }

    #[test]
    fn hook_sub_key_breaks_runs_with_equal_prefixes() {
        let hook = FnKeyHook::new(|s: &Stmt, _level: usize| -> Result<bool, Infallible> {
            Ok(s.name.starts_with('w'))
        });
        let elements = vec![stmt("r1", &["i"]), stmt("w1", &["i"]), stmt("w2", &["i"])];

        let runs = scan_runs(elements, 1, &hook).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(names(&runs[0]), vec!["r1"]);
        assert_eq!(names(&runs[1]), vec!["w1", "w2"]);
        assert!(runs[1].key.extra);
    }

    #[test]
    fn hook_errors_abort_the_scan() {
        let hook = FnKeyHook::new(|s: &Stmt, _level: usize| -> Result<(), String> {
            if s.name == "bad" {
                Err(format!("cannot key {}", s.name))
            } else {
                Ok(())
            }
        });
        let elements = vec![stmt("ok", &["i"]), stmt("bad", &["i"])];

        let err = scan_runs(elements, 1, &hook).unwrap_err();
        assert_eq!(err, "cannot key bad");
    }

    #[test]
    fn scan_runs_asks_the_hook_once_per_element() {
        let asked = std::cell::Cell::new(0);
        let hook = FnKeyHook::new(|s: &Stmt, _level: usize| -> Result<usize, Infallible> {
            asked.set(asked.get() + 1);
            Ok(s.scopes.len())
        });
        let elements = vec![
            stmt("a", &["i", "j"]),
            stmt("b", &["i", "j"]),
            stmt("c", &["i"]),
            stmt("d", &["k"]),
        ];

        let runs = scan_runs(elements.clone(), 1, &hook).unwrap();

        assert_eq!(asked.get(), 4);
        assert_eq!(runs.len(), 3);
        for run in &runs {
            assert_eq!(run.key, derive_key(&run.elements[0], 1, &hook).unwrap());
        }
        let rejoined: Vec<Stmt> = runs.into_iter().flat_map(|run| run.elements).collect();
        assert_eq!(rejoined, elements);
    }

    #[test]
    fn empty_input_has_no_runs() {
        let runs = scan_runs::<Stmt, Infallible, _>(Vec::new(), 1, &NoKeyHook).unwrap();
        assert!(runs.is_empty());
    }
}
