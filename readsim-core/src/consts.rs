pub const HG38_GENOME: &str = "hg38";
pub const HG38_DESCRIPTION: &str = "hg38, GRCh38 Genome Reference Consortium Human Reference 38";
pub const HG38_SOURCE: &str = "https://registry.opendata.aws/1000-genomes/";

/// Location of the 1000 Genomes GRCh38 analysis set the built-in index describes.
pub const HG38_FASTA_URL: &str = "http://s3.amazonaws.com/1000genomes/technical/reference/GRCh38_reference_genome/GRCh38_full_analysis_set_plus_decoy_hla.fa";

/// Default chromosome when a request names none.
pub const DEFAULT_CHROM: &str = "chr1";

/// Width of a region drawn without an explicit stop coordinate.
pub const DEFAULT_REGION_SPAN: u64 = 999;

/// The unknown-base symbol.
pub const UNKNOWN_BASE: char = 'N';

/// `(name, size, offset)` for the primary assembly, wrapped at 70 bases / 71 bytes per line.
pub const HG38_CHROMOSOMES: [(&str, u64, u64); 24] = [
    ("chr1", 248956422, 112),
    ("chr2", 242193529, 252513167),
    ("chr3", 198295559, 498166716),
    ("chr4", 190214555, 699295181),
    ("chr5", 181538259, 892227199),
    ("chr6", 170805979, 1076358974),
    ("chr7", 159345973, 1249605151),
    ("chr8", 145138636, 1411227608),
    ("chr9", 138394717, 1558439766),
    ("chr10", 133797422, 1698811664),
    ("chr11", 135086622, 1834520591),
    ("chr12", 133275309, 1971537135),
    ("chr13", 114364328, 2106716490),
    ("chr14", 107043718, 2222714708),
    ("chr15", 101991189, 2331287735),
    ("chr16", 90338345, 2434736053),
    ("chr17", 83257441, 2526365058),
    ("chr18", 80373285, 2610812004),
    ("chr19", 58617616, 2692333591),
    ("chr20", 64444167, 2751788714),
    ("chr21", 46709983, 2817153624),
    ("chr22", 50818468, 2864531005),
    ("chrX", 156040895, 2916075564),
    ("chrY", 57227415, 3074345726),
];
