use {
    burrow::{organize::Solution, Args, RunQuestions},
    clap::Parser,
};

fn main() {
    Solution::run(&Args::parse());
}
