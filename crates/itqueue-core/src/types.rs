use std::fmt;

use serde::{Deserialize, Serialize};

/// An IR element nested in a stack of iteration spaces.
///
/// `scopes` lists the element's scope descriptors from the outermost to the
/// innermost nesting level. The queue only ever reads this slice positionally
/// and compares its entries for equality.
pub trait Scoped {
    type Scope: Clone + PartialEq + fmt::Debug;

    fn scopes(&self) -> &[Self::Scope];
}

impl<T: Scoped + ?Sized> Scoped for &T {
    type Scope = T::Scope;

    fn scopes(&self) -> &[Self::Scope] {
        (**self).scopes()
    }
}

impl<T: Scoped + ?Sized> Scoped for Box<T> {
    type Scope = T::Scope;

    fn scopes(&self) -> &[Self::Scope] {
        (**self).scopes()
    }
}

/// Order in which the callback and the division into runs are interleaved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOrder {
    /// Divide into runs first, apply the callback once the nested runs have
    /// been processed (bottom-up).
    #[default]
    DivideThenApply,
    /// Apply the callback to each run first, then divide the result further
    /// (top-down).
    ApplyThenDivide,
}

impl EvaluationOrder {
    /// Short mnemonic used in traces and log events.
    pub fn mnemonic(self) -> &'static str {
        match self {
            EvaluationOrder::DivideThenApply => "fdta",
            EvaluationOrder::ApplyThenDivide => "fatd",
        }
    }
}

impl fmt::Display for EvaluationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stmt(Vec<char>);

    impl Scoped for Stmt {
        type Scope = char;

        fn scopes(&self) -> &[char] {
            &self.0
        }
    }

    #[test]
    fn references_and_boxes_forward_scopes() {
        let stmt = Stmt(vec!['i', 'j']);
        assert_eq!((&stmt).scopes(), &['i', 'j']);
        assert_eq!(Box::new(Stmt(vec!['k'])).scopes(), &['k']);
    }

    #[test]
    fn evaluation_order_defaults_to_divide_then_apply() {
        assert_eq!(EvaluationOrder::default(), EvaluationOrder::DivideThenApply);
        assert_eq!(EvaluationOrder::DivideThenApply.to_string(), "fdta");
        assert_eq!(EvaluationOrder::ApplyThenDivide.to_string(), "fatd");
    }
}
