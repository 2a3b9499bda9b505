use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use rayon::prelude::*;

use seqmatch::align;
use seqmatch::annotate::{self, Orf};
use seqmatch::assembly;
use seqmatch::index::{IndexMeta, KmerIndex};
use seqmatch::io::{fasta, fastq};
use seqmatch::matching::{self, ApproxParams, MatchReport};
use seqmatch::util::dna::{self, Alphabet};
use seqmatch::MatchError;

#[derive(Parser, Debug)]
#[command(
    name = "seqmatch",
    author,
    version,
    about = "Exact / approximate pattern matching and greedy assembly over DNA sequences",
    arg_required_else_help = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    Naive,
    Bm,
    Approx,
    All,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search one or more patterns in a reference genome
    Search {
        /// Reference FASTA file (all records are concatenated)
        reference: String,
        /// Pattern(s) to search for
        #[arg(short, long = "pattern", required = true, num_args = 1..)]
        patterns: Vec<String>,
        #[arg(long, value_enum, default_value_t = Method::All)]
        method: Method,
        /// Allowed mismatches (naive / approx only)
        #[arg(short = 'm', long = "mismatches", default_value_t = 0)]
        mismatches: usize,
        /// Also search the reverse complement (naive exact only)
        #[arg(long)]
        revcomp: bool,
        /// k-mer length of the index used by the approximate matcher;
        /// patterns must be at least (mismatches + 1) * kmer-len long
        #[arg(long = "kmer-len", default_value_t = matching::DEFAULT_KMER_LEN)]
        kmer_len: usize,
        #[arg(long, default_value = "ACGT")]
        alphabet: String,
        /// Add the unknown base N to the alphabet and map non-ACGT reference symbols to N
        #[arg(long = "allow-n")]
        allow_n: bool,
        /// Print every matched offset
        #[arg(long = "show-positions")]
        show_positions: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Build a k-mer index of the reference and save it
    Index {
        reference: String,
        #[arg(short, long, default_value_t = matching::DEFAULT_KMER_LEN)]
        k: usize,
        /// Output prefix (writes PREFIX.kmi)
        #[arg(short, long, default_value = "ref")]
        output: String,
    },
    /// Look up a substring in a saved k-mer index
    Query {
        index: String,
        substring: String,
    },
    /// Edit distance between a pattern and a reference genome
    EditDistance {
        reference: String,
        #[arg(short, long)]
        pattern: String,
        /// Corner-to-corner distance instead of best match anywhere in the reference
        #[arg(long)]
        global: bool,
    },
    /// Count overlap graph edges between reads
    Overlaps {
        reads: String,
        #[arg(short, long, default_value_t = 30)]
        k: usize,
    },
    /// Assemble reads into a superstring
    Assemble {
        reads: String,
        /// Minimum overlap length
        #[arg(short, long, default_value_t = 30)]
        k: usize,
        /// Exact shortest common superstring by permutation (tiny inputs only)
        #[arg(long)]
        exact: bool,
    },
    /// Multi-FASTA record statistics and open reading frames in frames 1-3
    FastaStats {
        reference: String,
        /// Print the sequence of the named record
        #[arg(long)]
        show: Option<String>,
    },
    /// Histogram of Phred+33 base qualities
    QualHist {
        reads: String,
    },
}

#[derive(Clone, Debug)]
struct SearchOpt {
    method: Method,
    mismatches: usize,
    revcomp: bool,
    approx: ApproxParams,
    alphabet: Alphabet,
    normalize: bool,
    show_positions: bool,
    threads: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Search {
            reference,
            patterns,
            method,
            mismatches,
            revcomp,
            kmer_len,
            alphabet,
            allow_n,
            show_positions,
            threads,
        } => {
            let mut symbols = alphabet.to_ascii_uppercase().into_bytes();
            if allow_n && !symbols.contains(&b'N') {
                symbols.push(b'N');
            }
            let alphabet = Alphabet::new(&symbols)?;
            let opt = SearchOpt {
                method,
                mismatches,
                revcomp,
                approx: ApproxParams::new(kmer_len, alphabet.clone()),
                alphabet,
                normalize: allow_n,
                show_positions,
                threads,
            };
            run_search(&reference, &patterns, &opt)
        }
        Commands::Index { reference, k, output } => run_index(&reference, k, &output),
        Commands::Query { index, substring } => run_query(&index, &substring),
        Commands::EditDistance { reference, pattern, global } => {
            run_edit_distance(&reference, &pattern, global)
        }
        Commands::Overlaps { reads, k } => run_overlaps(&reads, k),
        Commands::Assemble { reads, k, exact } => run_assemble(&reads, k, exact),
        Commands::FastaStats { reference, show } => run_fasta_stats(&reference, show.as_deref()),
        Commands::QualHist { reads } => run_qual_hist(&reads),
    }
}

fn run_search(reference: &str, patterns: &[String], opt: &SearchOpt) -> Result<()> {
    if opt.method == Method::Bm && opt.mismatches > 0 {
        bail!("Boyer-Moore is exact; use --method naive or approx with --mismatches");
    }
    if opt.revcomp && (opt.mismatches > 0 || opt.method != Method::Naive) {
        bail!("--revcomp is only supported for exact naive search");
    }
    let mut genome = fasta::read_genome(reference)?;
    if opt.normalize {
        genome = dna::normalize_seq(&genome);
    }
    opt.alphabet.validate(&genome)?;

    let patterns: Vec<Vec<u8>> =
        patterns.iter().map(|p| p.to_ascii_uppercase().into_bytes()).collect();
    for p in &patterns {
        opt.alphabet.validate(p)?;
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(opt.threads.max(1)).build()?;
    let outputs: Vec<String> = pool.install(|| {
        patterns
            .par_iter()
            .map(|p| search_one(p, &genome, opt))
            .collect::<Result<Vec<_>>>()
    })?;
    for out in outputs {
        print!("{}", out);
    }
    Ok(())
}

fn search_one(pattern: &[u8], genome: &[u8], opt: &SearchOpt) -> Result<String> {
    let mut runs: Vec<(&str, MatchReport)> = Vec::new();
    let run_naive = matches!(opt.method, Method::Naive | Method::All);
    let run_bm = opt.method == Method::Bm || (opt.method == Method::All && opt.mismatches == 0);
    let run_approx = matches!(opt.method, Method::Approx | Method::All);

    if run_naive {
        let report = if opt.revcomp {
            matching::naive_with_revcomp(pattern, genome)
        } else if opt.mismatches > 0 {
            matching::naive_mismatch(pattern, genome, opt.mismatches)
        } else {
            matching::naive_exact(pattern, genome)
        };
        runs.push(("naive", report));
    }
    if run_bm {
        runs.push(("boyer-moore", matching::boyer_moore_search(pattern, genome, &opt.alphabet)?));
    }
    if run_approx {
        match matching::approximate_match(pattern, genome, opt.mismatches, &opt.approx) {
            Ok(report) => runs.push(("approx", report)),
            Err(e @ MatchError::SegmentTooShort { .. }) if opt.method == Method::All => {
                warn!("skipping approximate search for {}: {}", String::from_utf8_lossy(pattern), e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let name = String::from_utf8_lossy(pattern);
    let mut out = String::new();
    for (method, r) in runs {
        debug!("{} {}: {} hits", name, method, r.occurrences.len());
        out.push_str(&format!(
            "{}\t{}\tmatches={}\talignments={}\tcomparisons={}\n",
            name,
            method,
            r.occurrences.len(),
            r.alignments,
            r.comparisons
        ));
        if opt.show_positions {
            let positions: Vec<String> = r.occurrences.iter().map(ToString::to_string).collect();
            out.push_str(&format!("  positions: {}\n", positions.join(",")));
        }
    }
    Ok(out)
}

fn run_index(reference: &str, k: usize, output: &str) -> Result<()> {
    let genome = fasta::read_genome(reference)?;
    let mut idx = KmerIndex::build(&genome, k)?;
    idx.set_meta(IndexMeta {
        source_file: Some(reference.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    let out_path = format!("{}.kmi", output);
    idx.save_to_file(&out_path)
        .map_err(|e| anyhow::anyhow!("cannot write index to '{}': {}", out_path, e))?;
    println!("reference: {}", reference);
    println!("total_len: {}", genome.len());
    println!("{}-mers: {}", k, idx.len());
    println!("k-mer index saved: {}", out_path);
    Ok(())
}

fn run_query(index_path: &str, substring: &str) -> Result<()> {
    let idx = KmerIndex::load_from_file(index_path)
        .map_err(|e| anyhow::anyhow!("cannot load index '{}': {}", index_path, e))?;
    if let Some(ts) = &idx.meta.build_timestamp {
        info!("index built {}", ts);
    }
    let mut hits = idx.query(substring.to_ascii_uppercase().as_bytes())?;
    hits.sort_unstable();
    println!("hits: {}", hits.len());
    for h in hits {
        println!("{}", h);
    }
    Ok(())
}

fn run_edit_distance(reference: &str, pattern: &str, global: bool) -> Result<()> {
    let genome = fasta::read_genome(reference)?;
    let p = pattern.to_ascii_uppercase().into_bytes();
    let d = if global {
        align::edit_distance(&p, &genome)
    } else {
        align::approximate_edit_distance(&p, &genome)
    };
    println!("pattern: {}", pattern);
    println!("edit_distance: {}", d);
    Ok(())
}

fn run_overlaps(reads_path: &str, k: usize) -> Result<()> {
    let (reads, _) = fastq::read_fastq(reads_path)?;
    let pairs = assembly::overlap_all_pairs(&reads, k);
    let mut heads: Vec<usize> = pairs.iter().map(|&(a, _)| a).collect();
    heads.dedup();
    println!("edges: {}", pairs.len());
    println!("nodes_with_outgoing_edges: {}", heads.len());
    Ok(())
}

fn run_assemble(reads_path: &str, k: usize, exact: bool) -> Result<()> {
    let (reads, _) = fastq::read_fastq(reads_path)?;
    if reads.is_empty() {
        bail!("FASTQ file '{}' contains no reads", reads_path);
    }
    let genome = if exact {
        let (sup, count) = assembly::shortest_common_superstring(&reads)
            .ok_or_else(|| anyhow::anyhow!("no reads to assemble"))?;
        println!("shortest_superstrings: {}", count);
        sup
    } else {
        assembly::greedy_scs(&reads, k)
    };
    println!("length: {}", genome.len());
    for base in *b"ACGT" {
        println!("{}: {}", base as char, genome.iter().filter(|&&b| b == base).count());
    }
    println!("{}", String::from_utf8_lossy(&genome));
    Ok(())
}

fn format_orf_extremes<'a>(orfs: impl IntoIterator<Item = &'a Orf>) -> String {
    match annotate::orf_extremes(orfs) {
        Some(e) => format!(
            "longest={}@{}\tshortest={}@{}",
            e.longest.len,
            e.longest.start + 1,
            e.shortest.len,
            e.shortest.start + 1
        ),
        None => "none".to_string(),
    }
}

fn run_fasta_stats(reference: &str, show: Option<&str>) -> Result<()> {
    let records = fasta::read_records(reference)?;
    if let Some(id) = show {
        let by_id = annotate::sequences_by_id(&records);
        let seq = by_id
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("no record named '{}' in '{}'", id, reference))?;
        println!(">{}", id);
        println!("{}", String::from_utf8_lossy(seq));
        return Ok(());
    }

    let stats = annotate::record_stats(&records)
        .ok_or_else(|| anyhow::anyhow!("FASTA file '{}' contains no sequences", reference))?;
    println!("records: {}", stats.count);
    println!("longest: {}\t{}", stats.longest.id, stats.longest.seq.len());
    println!("shortest: {}\t{}", stats.shortest.id, stats.shortest.seq.len());

    // 位置按 1-based 输出
    let mut all: Vec<Orf> = Vec::new();
    for rec in &records {
        for frame in annotate::FRAMES {
            let orfs = annotate::find_orfs(&rec.seq, frame);
            println!("{}\tframe {}\t{}", rec.id, frame, format_orf_extremes(&orfs));
            all.extend(orfs);
        }
    }
    debug!("{} ORFs across {} records", all.len(), records.len());
    println!("all\t{}", format_orf_extremes(&all));
    for frame in annotate::FRAMES {
        println!("frame {}\t{}", frame, format_orf_extremes(all.iter().filter(|o| o.frame == frame)));
    }
    Ok(())
}

fn run_qual_hist(reads_path: &str) -> Result<()> {
    let (_, quals) = fastq::read_fastq(reads_path)?;
    let hist = fastq::quality_histogram(&quals);
    for (q, n) in hist.iter().enumerate().filter(|&(_, &n)| n > 0) {
        println!("{}\t{}", q, n);
    }
    Ok(())
}
