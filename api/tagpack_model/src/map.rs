// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use indexmap::IndexMap;

use crate::{Text, Value};

/// An insertion ordered map with text keys. Inserting a key that is already present replaces the
/// associated value but keeps the key in its original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<Text, Value>);

impl Map {
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    pub fn with_capacity(n: usize) -> Self {
        Map(IndexMap::with_capacity(n))
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<Text>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &Text) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Text, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Text, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Text, Value> {
        self.0.values()
    }

    /// Reserve space for at least `additional` more entries, reporting allocation failure rather
    /// than aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), indexmap::TryReserveError> {
        self.0.try_reserve(additional)
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Text, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Text, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (Text, Value);
    type IntoIter = indexmap::map::IntoIter<Text, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<Text>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
