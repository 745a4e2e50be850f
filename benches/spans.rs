use depspan::conllu::ConlluReader;
use depspan::{spans, tree::Tree};
use divan::{Bencher, black_box};

fn main() {
    divan::main();
}

const TELESCOPE: &str = "# text = I saw the man with a telescope.\n\
    1\tI\tI\tPRON\tPRP\t_\t2\tnsubj\t_\t_\n\
    2\tsaw\tsee\tVERB\tVBD\t_\t0\troot\t_\t_\n\
    3\tthe\tthe\tDET\tDT\t_\t4\tdet\t_\t_\n\
    4\tman\tman\tNOUN\tNN\t_\t2\tdobj\t_\t_\n\
    5\twith\twith\tADP\tIN\t_\t2\tprep\t_\t_\n\
    6\ta\ta\tDET\tDT\t_\t7\tdet\t_\t_\n\
    7\ttelescope\ttelescope\tNOUN\tNN\t_\t5\tpobj\t_\t_\n\
    8\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_\n\n";

fn fixture() -> Tree {
    ConlluReader::from_str(TELESCOPE).next().unwrap().unwrap()
}

#[divan::bench]
fn parse_conllu(bencher: Bencher) {
    bencher.bench_local(|| {
        let reader = ConlluReader::from_str(black_box(TELESCOPE));
        for result in reader {
            black_box(result.unwrap());
        }
    });
}

#[divan::bench]
fn extract_paths(bencher: Bencher) {
    let tree = fixture();
    bencher.bench_local(|| black_box(spans::paths(black_box(&tree))));
}

#[divan::bench]
fn extract_subtrees(bencher: Bencher) {
    let tree = fixture();
    bencher.bench_local(|| black_box(spans::subtrees(black_box(&tree))));
}

#[divan::bench]
fn extract_argument_spans(bencher: Bencher) {
    let tree = fixture();
    bencher.bench_local(|| black_box(spans::argument_spans(black_box(&tree))));
}
