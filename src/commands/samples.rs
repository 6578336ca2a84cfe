//! `samples` command: usage examples for the image.

use super::{CommandOutcome, Context};

/// Build the usage examples for the configured image name.
pub fn execute(ctx: &Context<'_>) -> CommandOutcome {
    Ok(Some(samples(&ctx.environments.docker_name)))
}

fn samples(image: &str) -> String {
    let run = format!("docker run --rm -it {}", image);
    let mut text = String::from("Use -h or --help for more information about commands.\n");
    text.push_str("Samples:\n");
    text.push_str(&format!(
        "\t{} run /samples/say-hello.js -f /samples/sample-inputs/0.txt -d /samples/sample-inputs\n",
        run
    ));
    text.push_str(&format!(
        "\t{} shell\t: starts enhanced d8 shell with the given arguments\n",
        run
    ));
    text.push_str(&format!(
        "\t{} d8\t: starts default d8 shell with the given arguments\n",
        run
    ));
    text.push_str(&format!(
        "\t{} bash\t: starts a bash shell with the given arguments\n",
        run
    ));
    text.push_str(&format!("\t{}\t: shows the help message\n", run));
    text.push_str(&format!("\t{} --version\t: displays the program version\n", run));
    text
}
