//! Benchmarks for changing the value of a `Variant`, across each of the assignment paths

use compact_variant::{
    Alternative,
    CopyAlternative,
    LifetimeError,
    Variant,
};
use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};

const WORD: &str = "This string has thirty-four chars.";

/// An alternative whose copy may fail but never does, so its copies are staged
#[derive(Debug, Clone, PartialEq)]
struct Staged([u64; 4]);

impl Alternative for Staged {}

impl CopyAlternative for Staged {
    const COPY_MAY_FAIL: bool = true;

    fn try_copy(&self) -> Result<Self, LifetimeError> {
        Ok(self.clone())
    }
}

type Set = (u64, String, Staged);

fn same_alternative(c: &mut Criterion) {
    let source: Variant<Set> = Variant::new(String::from(WORD));
    c.bench_function("copy same alternative", |b| {
        let mut dest: Variant<Set> = Variant::new(String::from("short"));
        b.iter(|| {
            black_box(&mut dest).try_assign(black_box(&source)).unwrap();
        })
    });
}

fn direct(c: &mut Criterion) {
    let int: Variant<Set> = Variant::new(42_u64);
    let text: Variant<Set> = Variant::new(String::from(WORD));
    c.bench_function("copy direct", |b| {
        let mut dest: Variant<Set> = Variant::new(0_u64);
        b.iter(|| {
            black_box(&mut dest).try_assign(black_box(&text)).unwrap();
            black_box(&mut dest).try_assign(black_box(&int)).unwrap();
        })
    });
}

fn staged(c: &mut Criterion) {
    let int: Variant<Set> = Variant::new(42_u64);
    let staged: Variant<Set> = Variant::new(Staged([1, 2, 3, 4]));
    c.bench_function("copy staged", |b| {
        let mut dest: Variant<Set> = Variant::new(0_u64);
        b.iter(|| {
            black_box(&mut dest).try_assign(black_box(&staged)).unwrap();
            black_box(&mut dest).try_assign(black_box(&int)).unwrap();
        })
    });
}

fn move_assign(c: &mut Criterion) {
    c.bench_function("move different alternative", |b| {
        let mut dest: Variant<Set> = Variant::new(0_u64);
        b.iter(|| {
            let source: Variant<Set> = Variant::new(Staged(black_box([1, 2, 3, 4])));
            black_box(&mut dest).try_move_assign(source).unwrap();
            black_box(&mut dest).try_set(black_box(7_u64)).unwrap();
        })
    });
}

fn emplace(c: &mut Criterion) {
    c.bench_function("emplace", |b| {
        let mut dest: Variant<Set> = Variant::new(0_u64);
        b.iter(|| {
            black_box(dest.emplace::<2>(Staged(black_box([1, 2, 3, 4]))));
            black_box(dest.emplace::<0>(black_box(7)));
        })
    });
}

fn across(c: &mut Criterion) {
    let source: Variant<(f64, String)> = Variant::new(String::from(WORD));
    c.bench_function("assign across sets", |b| {
        let mut dest: Variant<Set> = Variant::new(0_u64);
        b.iter(|| {
            black_box(&mut dest).try_assign_across(black_box(&source)).unwrap();
        })
    });
}

criterion_group!(
    assign,
    same_alternative,
    direct,
    staged,
    move_assign,
    emplace,
    across
);
criterion_main!(assign);
