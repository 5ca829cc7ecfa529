use anyhow::Context;
use clap::Parser;

use semver_gen::analyzer::version_computer;
use semver_gen::config;
use semver_gen::domain::branch::BranchClassifier;
use semver_gen::domain::strategy::determine_bump_strategy;
use semver_gen::git::{self, Git2Repository, GitRepository};
use semver_gen::output;
use semver_gen::params::{Params, RawInputs};
use semver_gen::remote::GitHubClient;
use semver_gen::ui;

#[derive(clap::Parser)]
#[command(
    name = "semver-gen",
    about = "Calculate the next semantic version tag for a CI run"
)]
struct Args {
    #[arg(long, env = "GITHUB_SHA", help = "Commit sha the run was triggered on")]
    commit_sha: Option<String>,

    #[arg(
        long,
        env = "INPUT_BUMP",
        help = "Bump strategy: auto, major, minor or patch"
    )]
    bump: Option<String>,

    #[arg(
        long,
        env = "INPUT_BASE_VERSION",
        help = "Version to use as base instead of the latest git tag"
    )]
    base_version: Option<String>,

    #[arg(
        long,
        env = "INPUT_PREFIX",
        help = "Prefix prepended to every generated tag"
    )]
    prefix: Option<String>,

    #[arg(
        long,
        env = "INPUT_PRERELEASE_ID",
        help = "Identifier used for prerelease builds"
    )]
    prerelease_id: Option<String>,

    #[arg(
        long,
        env = "INPUT_MAIN_BRANCH_NAME",
        help = "Name of the release branch"
    )]
    main_branch_name: Option<String>,

    #[arg(
        long,
        env = "INPUT_DEVELOP_BRANCH_NAME",
        help = "Name of the development branch"
    )]
    develop_branch_name: Option<String>,

    #[arg(
        long,
        env = "INPUT_TAG_MESSAGE",
        help = "Message attached to the created tag"
    )]
    tag_message: Option<String>,

    #[arg(
        long,
        env = "INPUT_AUTH_TOKEN",
        hide_env_values = true,
        help = "Token used to create the tag through the API"
    )]
    auth_token: Option<String>,

    #[arg(
        long,
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/name form"
    )]
    repository: Option<String>,

    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        help = "Compute the tag without creating it (true/false)"
    )]
    dry_run: Option<String>,

    #[arg(long, env = "INPUT_DEBUG", help = "Enable debug output (true/false)")]
    debug: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        ui::display_error(&format!("failed to generate semver version: {:#}", err));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let params = Params::from_inputs(RawInputs {
        commit_sha: args.commit_sha,
        bump: args.bump,
        base_version: args.base_version,
        prefix: args.prefix,
        prerelease_id: args.prerelease_id,
        main_branch: args.main_branch_name,
        develop_branch: args.develop_branch_name,
        tag_message: args.tag_message,
        auth_token: args.auth_token,
        repository: args.repository,
        dry_run: args.dry_run,
        debug: args.debug,
    })
    .context("failed to load parameters")?;

    ui::display_debug(params.debug, &params.to_string());

    let config = config::load_config(args.config.as_deref())?;
    let classifier = BranchClassifier::new(&config.conventions)?;

    let repo = Git2Repository::open(".")
        .map_err(|_| anyhow::anyhow!("current folder is not a git repository"))?;
    if !repo.is_repo() {
        anyhow::bail!("current folder is not a git repository");
    }

    let dest_branch = repo.current_branch()?;
    let message = repo
        .commit_message(params.commit_sha.as_deref())
        .context("failed extracting source and dest branches from commit")?;
    let source_branch = git::source_branch_from_message(&message)
        .context("failed extracting source and dest branches from commit")?;

    ui::display_debug(
        params.debug,
        &format!(
            "source branch: {:?}, dest branch: {:?}",
            source_branch, dest_branch
        ),
    );

    let decision = determine_bump_strategy(
        params.bump,
        &source_branch,
        &dest_branch,
        &params.main_branch,
        &params.develop_branch,
        &classifier,
    );

    ui::display_debug(
        params.debug,
        &format!(
            "method: {}, component: {:?}",
            decision.method, decision.component
        ),
    );

    let record = version_computer::compute_tag(
        &repo,
        &classifier,
        &decision,
        &source_branch,
        &dest_branch,
        &params,
    )?;

    if !params.dry_run {
        let token = params.auth_token.clone().unwrap_or_default();
        let commit_sha = params
            .commit_sha
            .clone()
            .ok_or_else(|| anyhow::anyhow!("commit sha is required to create a tag"))?;

        let client = GitHubClient::new(token, &params.owner, &params.repository)?;
        client.create_tag(&commit_sha, &record.semver_tag, &params.tag_message)?;

        ui::display_success(&format!("created tag {}", record.semver_tag));
    }

    let is_prerelease = record.is_prerelease.to_string();
    let outputs = [
        ("PREVIOUS_TAG", record.previous_tag.as_str()),
        ("ANCESTOR_TAG", record.ancestor_tag.as_str()),
        ("SEMVER_TAG", record.semver_tag.as_str()),
        ("IS_PRERELEASE", is_prerelease.as_str()),
    ];

    for (key, value) in outputs {
        ui::display_output(key, value);
        output::write_output(key, value)?;
    }

    Ok(())
}
