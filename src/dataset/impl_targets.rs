use super::{AsSingleTargets, DatasetBase, Label, Labels, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};
use std::collections::HashMap;

/// A one-dimensional NdArray can act as targets
impl<E, S: Data<Elem = E>> AsSingleTargets for ArrayBase<S, Ix1> {
    type Elem = E;

    fn as_single_targets(&self) -> ArrayView1<'_, E> {
        self.view()
    }
}

/// A NdArray with discrete labels can act as labels
impl<L: Label, S: Data<Elem = L>> Labels for ArrayBase<S, Ix1> {
    type Elem = L;

    fn label_count(&self) -> HashMap<L, usize> {
        let mut map = HashMap::new();

        for elem in self.iter() {
            *map.entry(elem.clone()).or_insert(0) += 1;
        }

        map
    }
}

/// A dataset can act as targets
impl<R: Records, T: AsSingleTargets> AsSingleTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem> {
        self.targets.as_single_targets()
    }
}

/// A dataset with discrete labels can act as labels
impl<L: Label, R: Records, T: Labels<Elem = L>> Labels for DatasetBase<R, T> {
    type Elem = L;

    fn label_count(&self) -> HashMap<L, usize> {
        self.targets.label_count()
    }
}
