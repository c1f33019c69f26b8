use kira_interval_cluster::{ChromClusters, ClusterOptions, ClusterTree};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Synthetic read alignments: (start, end, read name)
    let reads = [
        (3, 4, "r0"),
        (6, 7, "r1"),
        (9, 10, "r2"),
        (1, 2, "r3"),
        (3, 8, "r4"),
    ];

    let mut tree = ClusterTree::with_options(ClusterOptions::new(0, 1).with_seed(42))?;
    for &(start, end, name) in &reads {
        tree.insert(start, end, name)?;
    }
    for cluster in tree.iter() {
        let ids: Vec<&str> = cluster.ids().copied().collect();
        println!(">Cluster {}-{} ({} reads)", cluster.start(), cluster.end(), cluster.len());
        for id in ids {
            println!("  - {id}");
        }
    }

    // Same data spread over two chromosomes, default options (max_dist=1, min_intervals=2).
    let records = reads
        .iter()
        .enumerate()
        .map(|(i, &(start, end, _))| (if i % 2 == 0 { "chr1" } else { "chr2" }, start, end, i));
    let by_chrom = ChromClusters::from_records(ClusterOptions::default(), records)?;
    for (chrom, regions) in by_chrom.regions() {
        for region in regions {
            println!("{chrom}\t{}\t{}\t{:?}", region.start, region.end, region.ids);
        }
    }
    Ok(())
}
