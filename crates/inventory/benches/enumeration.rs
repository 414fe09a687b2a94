use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use gridstore_inventory::{
    Attachment, Inventory, IterationToken, MemoryInventory, NetworkInventoryHandler,
    QueryContext, ResourceStack, StorageChannel, StorageHandler,
};

fn build_network(kinds: usize, cells: usize) -> Arc<NetworkInventoryHandler> {
    let mut network = NetworkInventoryHandler::new(StorageChannel::Items);
    for cell in 0..cells {
        let stacks = (0..kinds).map(|k| ResourceStack::new(format!("bench:item_{k}"), (cell + 1) as u64));
        let inventory = MemoryInventory::new(StorageChannel::Items).with_contents(stacks);
        network.add_member(Arc::new(inventory)).unwrap();
    }
    Arc::new(network)
}

fn handlers_over(network: &Arc<NetworkInventoryHandler>, count: usize) -> Vec<StorageHandler> {
    (0..count)
        .map(|_| {
            StorageHandler::new(Attachment::Handler(network.clone()), StorageChannel::Items).unwrap()
        })
        .collect()
}

fn bench_shared_network_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_network_enumeration");

    for handlers in [2usize, 8, 32] {
        let network = build_network(256, 8);
        let views = handlers_over(&network, handlers);
        group.throughput(Throughput::Elements(handlers as u64));

        // All handlers draw from one cached pool.
        group.bench_with_input(BenchmarkId::new("one_token", handlers), &views, |b, views| {
            let mut token = IterationToken::new(0);
            b.iter(|| {
                token = token.next();
                let mut ctx = QueryContext::new(token);
                for view in views {
                    black_box(view.available_items(StorageChannel::Items.create_list(), &mut ctx));
                }
            });
        });

        // Every handler gets its own token, so the network is walked each time.
        group.bench_with_input(BenchmarkId::new("token_per_handler", handlers), &views, |b, views| {
            let mut token = IterationToken::new(0);
            b.iter(|| {
                let mut ctx = QueryContext::new(token);
                for view in views {
                    token = token.next();
                    ctx.advance(token);
                    black_box(view.available_items(StorageChannel::Items.create_list(), &mut ctx));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_shared_network_enumeration);
criterion_main!(benches);
