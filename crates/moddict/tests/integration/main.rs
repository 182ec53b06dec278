mod examples;
mod mod_dict;
