use hintld_core::{
    Category, PublicationParser, RawInteractionRow, ReconcileOptions, Table, reconcile,
};

fn synthetic_table(n: usize, step: usize) -> Table {
    Table::from_rows(
        (0..n)
            .step_by(step)
            .map(|i| RawInteractionRow {
                uniprot_a: format!("P{i:05}"),
                uniprot_b: format!("Q{i:05}"),
                gene_a: format!("GA{i}"),
                gene_b: format!("GB{i}"),
                publications: format!("{i};{}:MI:0018:HT|PDB_{i:04}X:MI:0019:LC", i + 1),
                ..Default::default()
            })
            .collect(),
    )
}

fn main() {
    divan::main();
}

#[divan::bench(args = [1_000, 100_000])]
fn reconcile_binary(bencher: divan::Bencher, n: usize) {
    let all = synthetic_table(n, 1);
    let hq = synthetic_table(n, 4);
    let options = ReconcileOptions::default();
    bencher.bench(|| reconcile(&all, Some(&hq), Category::Binary, &options));
}

#[divan::bench]
fn parse_publication_fields(bencher: divan::Bencher) {
    let table = synthetic_table(10_000, 1);
    let parser = PublicationParser::default();
    bencher.bench(|| {
        for row in table.rows() {
            let _ = parser.parse(&row.publications).unwrap();
        }
    });
}
