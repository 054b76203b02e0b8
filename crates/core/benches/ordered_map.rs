// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use std::{
    collections::{BTreeMap, VecDeque},
    hint::black_box,
};

use ahash::AHashMap;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use recency_core::OrderedMap;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn ordered_map(n: usize) -> OrderedMap<usize, String> {
    (0..n).map(|i| (i, i.to_string())).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("BTreeMap", n), &n, |b, &n| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for i in 0..n {
                    map.insert(i, i.to_string());
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("AHashMap", n), &n, |b, &n| {
            b.iter(|| {
                let mut map = AHashMap::new();
                for i in 0..n {
                    map.insert(i, i.to_string());
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", n), &n, |b, &n| {
            b.iter(|| {
                let mut list = VecDeque::new();
                for i in 0..n {
                    list.push_back(i.to_string());
                }
                black_box(list)
            });
        });

        group.bench_with_input(BenchmarkId::new("IndexMap", n), &n, |b, &n| {
            b.iter(|| {
                let mut map = IndexMap::new();
                for i in 0..n {
                    map.insert(i, i.to_string());
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("OrderedMap", n), &n, |b, &n| {
            b.iter(|| {
                let mut map = OrderedMap::new();
                for i in 0..n {
                    map.insert(i, i.to_string());
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_iterate_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate_values");

    for n in SIZES {
        let btree: BTreeMap<usize, String> = (0..n).map(|i| (i, i.to_string())).collect();
        let hash: AHashMap<usize, String> = (0..n).map(|i| (i, i.to_string())).collect();
        let index: IndexMap<usize, String> = (0..n).map(|i| (i, i.to_string())).collect();
        let ordered = ordered_map(n);

        group.bench_function(BenchmarkId::new("BTreeMap", n), |b| {
            b.iter(|| btree.values().map(String::len).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("AHashMap", n), |b| {
            b.iter(|| hash.values().map(String::len).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("IndexMap", n), |b| {
            b.iter(|| index.values().map(String::len).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("OrderedMap", n), |b| {
            b.iter(|| ordered.values().map(String::len).sum::<usize>());
        });
    }

    group.finish();
}

fn bench_remove_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_middle");

    for n in SIZES {
        let key = n / 2;

        group.bench_function(BenchmarkId::new("IndexMap::shift_remove", n), |b| {
            b.iter_batched_ref(
                || (0..n).map(|i| (i, i.to_string())).collect::<IndexMap<_, _>>(),
                |map| black_box(map.shift_remove(&key)),
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("VecDeque::retain", n), |b| {
            let needle = key.to_string();
            b.iter_batched_ref(
                || (0..n).map(|i| i.to_string()).collect::<VecDeque<_>>(),
                |list| list.retain(|s| *s != needle),
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("OrderedMap", n), |b| {
            b.iter_batched_ref(
                || ordered_map(n),
                |map| black_box(map.remove(&key)),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_reinsert_oldest(c: &mut Criterion) {
    let mut map = ordered_map(10_000);

    c.bench_function("OrderedMap::insert (refresh oldest)", |b| {
        b.iter(|| {
            let (&key, _) = map.front().unwrap();
            black_box(map.insert(key, String::new()))
        });
    });
}

fn bench_offset(c: &mut Criterion) {
    let map = ordered_map(1_000);
    let begin = map.begin();

    c.bench_function("OrderedMap::offset (500 steps)", |b| {
        b.iter(|| map.offset(black_box(begin), 500));
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_iterate_values,
    bench_remove_middle,
    bench_reinsert_oldest,
    bench_offset
);
criterion_main!(benches);
