//! The CSP-JSON object model: a parsed instance and its building blocks.

/// A flat container of integers, representing either a 1-D list or a 2-D
/// array of fixed-width tuples.
///
/// 1) 2D: `[[1,2], [3,4], [5,6]]` has arity 2, size 3.
/// 2) 2D: `[[]]` has arity 0, size 1.
/// 3) 1D: `[1,2,3]` has arity -1, size 3.
///
/// An arity of 0 represents `size` empty tuples; this is how an empty
/// no-goods list ("nothing forbidden") is stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntTuples {
    size: usize,
    arity: i32,
    data: Vec<i64>,
}

impl IntTuples {
    /// An empty container with the given arity.
    ///
    /// # Panics
    /// Panics if `arity < -1`.
    pub fn empty(arity: i32) -> IntTuples {
        assert!(arity >= -1, "arity must be -1 (1-D) or non-negative (2-D)");

        IntTuples {
            size: 0,
            arity,
            data: Vec::new(),
        }
    }

    /// A 1-D list of integers.
    pub fn list(data: Vec<i64>) -> IntTuples {
        IntTuples {
            size: data.len(),
            arity: -1,
            data,
        }
    }

    /// `size` tuples of width `arity`, given as a row-major flat buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != size * arity`.
    pub fn tuples(size: usize, arity: usize, data: Vec<i64>) -> IntTuples {
        assert_eq!(size * arity, data.len(), "data must hold size * arity entries");

        IntTuples {
            size,
            arity: arity as i32,
            data,
        }
    }

    /// The number of tuples (2-D) or integers (1-D) in the container.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The width of each tuple, or -1 if this is a 1-D list.
    pub fn arity(&self) -> i32 {
        self.arity
    }

    /// `true` if this is a 1-D list of integers.
    pub fn is_list(&self) -> bool {
        self.arity == -1
    }

    /// The flat backing buffer, holding `size * |arity|` entries.
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// The `index`-th tuple.
    ///
    /// # Panics
    /// Panics if this is a 1-D list, or if `index >= size`.
    pub fn tuple(&self, index: usize) -> &[i64] {
        assert!(self.arity >= 0, "not a 2-D container");

        let arity = self.arity as usize;
        &self.data[index * arity..(index + 1) * arity]
    }

    /// Iterate over the tuples of a 2-D container.
    ///
    /// # Panics
    /// Panics if this is a 1-D list.
    pub fn iter_tuples(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        assert!(self.arity >= 0, "not a 2-D container");

        let arity = self.arity as usize;
        (0..self.size).map(move |index| &self.data[index * arity..(index + 1) * arity])
    }
}

/// The CSP-JSON metadata object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    /// Identifies the instance.
    pub id: String,
    /// The generator algorithm that produced the instance.
    pub algo: String,
    /// The raw JSON text of the `params` value, delimiters included.
    ///
    /// The parameters are generator dependent, so they are captured verbatim
    /// and never interpreted by this crate.
    pub params_json: String,
}

/// The domain of a CSP variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Explicitly lists the values of the domain, one by one. Always a 1-D
    /// list.
    Values(IntTuples),
}

/// A reusable constraint definition, referenced by [`Constraint`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstraintDef {
    /// Lists the combinations of values that are forbidden. Always 2-D; the
    /// arity is the number of variables the definition applies to.
    NoGoods(IntTuples),
}

/// A constraint instantiation between variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraint {
    /// References an entry in [`Instance::constraint_defs`].
    pub id: i64,
    /// The variables the definition is applied to, as a 1-D list of indices
    /// into [`Instance::vars`].
    pub vars: IntTuples,
}

/// A parsed CSP-JSON instance.
///
/// A successful parse guarantees the shape of every field matches the
/// grammar; referential integrity (e.g. that every variable references an
/// existing domain) is checked separately by [`crate::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instance {
    pub meta: Meta,

    pub domains: Vec<Domain>,

    /// Each entry references a domain by index. Always a 1-D list.
    pub vars: IntTuples,

    pub constraint_defs: Vec<ConstraintDef>,

    pub constraints: Vec<Constraint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_accessors() {
        let xs = IntTuples::list(vec![4, 5, 6]);

        assert_eq!(3, xs.size());
        assert_eq!(-1, xs.arity());
        assert!(xs.is_list());
        assert_eq!(xs.data(), [4, 5, 6]);
    }

    #[test]
    fn tuple_accessors() {
        let xs = IntTuples::tuples(2, 3, vec![1, 2, 3, 4, 5, 6]);

        assert_eq!(2, xs.size());
        assert_eq!(3, xs.arity());
        assert!(!xs.is_list());
        assert_eq!(xs.tuple(0), [1, 2, 3]);
        assert_eq!(xs.tuple(1), [4, 5, 6]);
        assert_eq!(
            xs.iter_tuples().collect::<Vec<_>>(),
            vec![[1, 2, 3], [4, 5, 6]]
        );
    }

    #[test]
    fn zero_arity_tuples_have_no_data() {
        let xs = IntTuples::tuples(3, 0, vec![]);

        assert_eq!(3, xs.size());
        assert_eq!(0, xs.arity());
        assert!(xs.data().is_empty());
        assert_eq!(0, xs.iter_tuples().map(<[i64]>::len).sum::<usize>());
    }

    #[test]
    fn default_is_the_empty_container() {
        let xs = IntTuples::default();

        assert_eq!(0, xs.size());
        assert_eq!(0, xs.arity());
        assert!(xs.data().is_empty());
    }

    #[test]
    #[should_panic(expected = "arity must be -1")]
    fn empty_rejects_invalid_arity() {
        let _ = IntTuples::empty(-2);
    }
}
