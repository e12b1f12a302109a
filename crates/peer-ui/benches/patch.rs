use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use peer_core::{AttributeId, Color, Edges, NodeHandle, SharedNative};
use peer_testing::RecordingNative;
use peer_ui::{Component, ComponentKind, RootContext};

const NODE: NodeHandle = NodeHandle::new(1);
const COMPONENT_SAMPLES: &[usize] = &[16, 64, 256];

struct PatchFixture {
    native: Rc<RefCell<RecordingNative>>,
    components: Vec<Component>,
}

impl PatchFixture {
    fn new(count: usize) -> Self {
        let native = RecordingNative::shared();
        let shared: SharedNative = native.clone();
        let context = RootContext::new(shared);
        let components = (0..count)
            .map(|index| {
                let node = NodeHandle::new(NODE.raw() + index as u64);
                Component::bound(context.clone(), ComponentKind::Text, node)
            })
            .collect();
        Self { native, components }
    }

    fn stage(&mut self, generation: u32) {
        for component in &mut self.components {
            component
                .width(100)
                .and_then(|c| c.height(40))
                .and_then(|c| c.padding(Edges::all(4.0)))
                .and_then(|c| c.font_size(14 + (generation % 2) as i32))
                .and_then(|c| c.font_color(Color::BLACK))
                .expect("text attributes");
        }
    }

    fn patch(&mut self) -> usize {
        let evicted = self
            .components
            .iter_mut()
            .map(|component| component.patch().len())
            .sum();
        self.native.borrow_mut().clear();
        evicted
    }
}

fn bench_steady_state(c: &mut Criterion) {
    let mut fixture = PatchFixture::new(64);
    fixture.stage(0);
    fixture.patch();

    c.bench_function("patch_unchanged", |b| {
        b.iter(|| {
            fixture.stage(0);
            black_box(fixture.patch());
        });
    });
}

fn bench_changing(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch_changing");
    for &count in COMPONENT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("components", count), &count, |b, &count| {
            let mut fixture = PatchFixture::new(count);
            let mut generation = 0;
            b.iter(|| {
                generation += 1;
                fixture.stage(generation);
                black_box(fixture.patch());
            });
        });
    }
    group.finish();
}

fn bench_set_and_clear(c: &mut Criterion) {
    let mut fixture = PatchFixture::new(64);

    c.bench_function("patch_set_then_clear", |b| {
        b.iter(|| {
            fixture.stage(0);
            fixture.patch();
            for component in &mut fixture.components {
                component.unset(AttributeId::Width).expect("width");
                component.clear_staged();
            }
            black_box(fixture.patch());
        });
    });
}

criterion_group!(patch, bench_steady_state, bench_changing, bench_set_and_clear);
criterion_main!(patch);
