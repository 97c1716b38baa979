pub trait ItemId {
    type IdType;

    fn id(&self) -> Self::IdType;
}

/// (De)serializes a map of items as a plain list, keying every item by its own id.
///
/// Duplicate ids are rejected while deserializing so a later entry can never
/// silently shadow an earlier one.
#[allow(clippy::module_inception)]
pub mod id_map {
    use super::ItemId;
    use serde::Serialize;
    use serde::de::{Deserialize, Deserializer, Error};
    use serde::ser::Serializer;
    use std::collections::HashSet;
    use std::fmt::Display;
    use std::hash::Hash;

    pub fn serialize<'a, S, T: ItemId + Serialize + 'a, I: IntoIterator<Item = (&'a T::IdType, &'a T)>>(
        map: I,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.into_iter().map(|(_, item)| item))
    }

    pub fn deserialize<'de, D, T, O>(deserializer: D) -> Result<O, D::Error>
    where
        D: Deserializer<'de>,
        T: ItemId + Deserialize<'de>,
        T::IdType: Eq + Hash + Clone + Display,
        O: FromIterator<(T::IdType, T)>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let id = item.id();
            if !seen.insert(id.clone()) {
                return Err(D::Error::custom(format!("duplicate id `{id}`")));
            }
        }
        Ok(items.into_iter().map(|item| (item.id(), item)).collect())
    }
}
